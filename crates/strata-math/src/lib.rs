//! 2D math primitives for the Strata camera core.

mod rect;

pub use rect::Rect;
