//! Headless camera demo: runs a scripted actor through a small level with
//! trigger volumes and prints the camera debug overlay. Stands in for the
//! game loop to show the intended call order: collision events, then one
//! camera update, then consumption of the published pose.

use clap::Parser;
use glam::Vec2;
use strata_camera::{
    ActorId, CameraCore, CameraEvent, Facing, MovementFlags, ShakeRequest, TargetSnapshot,
    TriggerId, TriggerVolume,
};
use strata_config::{CameraConfig, CliArgs, default_config_dir};
use strata_math::Rect;

const DT: f32 = 1.0 / 60.0;
const FRAMES: u32 = 600;
const OVERLAY_INTERVAL: u32 = 60;

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = match CameraConfig::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load camera config: {err}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);
    if let Err(err) = config.validate() {
        eprintln!("camera config rejected: {err}");
        std::process::exit(1);
    }

    strata_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let overlay = config.debug.overlay;
    let shake_request = ShakeRequest::from(&config.shake);
    let mut camera = match CameraCore::new(config) {
        Ok(camera) => camera,
        Err(err) => {
            eprintln!("camera rejected config: {err}");
            std::process::exit(1);
        }
    };

    // A 16:9-ish viewport, 32x18 world units at zoom 1.0.
    camera.set_viewport(32.0, 18.0);
    let hero = ActorId(1);
    camera.set_target(hero, "hero");

    build_level(&mut camera);

    tracing::info!(frames = FRAMES, "starting scripted run");
    let mut overlapping: Vec<TriggerId> = Vec::new();
    let mut shake_fired = false;

    for frame in 0..FRAMES {
        let t = frame as f32 * DT;
        let snapshot = scripted_actor(t);

        // The overlap diff stands in for the collision system's
        // enter/exit reports.
        let now = camera.triggers().ids_overlapping(snapshot.position);
        for &id in &now {
            if !overlapping.contains(&id) {
                camera.push_event(CameraEvent::TriggerEntered {
                    actor: hero,
                    trigger: id,
                });
            }
        }
        for &id in &overlapping {
            if !now.contains(&id) {
                camera.push_event(CameraEvent::TriggerExited {
                    actor: hero,
                    trigger: id,
                });
            }
        }
        overlapping = now;

        // Hard landing at the end of the fall kicks off a shake.
        if t >= 6.5 && !shake_fired {
            camera.start_shake(shake_request);
            shake_fired = true;
        }

        let pose = camera.update(Some(&snapshot), DT);

        if overlay && frame % OVERLAY_INTERVAL == 0 {
            println!("--- t={t:.2}s ---");
            println!("{}", camera.debug_overlay());
        } else if frame % OVERLAY_INTERVAL == 0 {
            tracing::info!(
                t,
                x = pose.position.x,
                y = pose.position.y,
                zoom = pose.zoom,
                "camera pose"
            );
        }
    }

    tracing::info!("scripted run complete");
}

/// Two overlapping volumes: a cavern that pins the boundary, and a gallery
/// inside it that widens the view.
fn build_level(camera: &mut CameraCore) {
    let cavern = TriggerVolume::new(
        "cavern",
        Rect::new(Vec2::new(20.0, -15.0), Vec2::new(70.0, 20.0)),
    )
    .with_boundary(Rect::new(Vec2::new(18.0, -16.0), Vec2::new(74.0, 22.0)));

    let gallery = TriggerVolume::new(
        "gallery",
        Rect::new(Vec2::new(40.0, -15.0), Vec2::new(60.0, 20.0)),
    )
    .with_zoom(-0.3);

    for volume in [cavern, gallery] {
        if let Err(err) = camera.register_trigger(volume) {
            tracing::error!(%err, "trigger volume rejected at level load");
        }
    }
}

/// Hand-animated actor: walk, run, fall into the cavern, walk out.
fn scripted_actor(t: f32) -> TargetSnapshot {
    let (position, velocity, flags) = if t < 2.0 {
        // Walk right along the ground.
        let x = t * 3.0;
        (
            Vec2::new(x, 2.0),
            Vec2::new(3.0, 0.0),
            MovementFlags {
                grounded: true,
                facing: Facing::Right,
                ..Default::default()
            },
        )
    } else if t < 5.0 {
        // Break into a run.
        let x = 6.0 + (t - 2.0) * 9.0;
        (
            Vec2::new(x, 2.0),
            Vec2::new(9.0, 0.0),
            MovementFlags {
                grounded: true,
                running: true,
                facing: Facing::Right,
                ..Default::default()
            },
        )
    } else if t < 6.5 {
        // Run off a ledge and fast-fall into the cavern.
        let fall = t - 5.0;
        (
            Vec2::new(33.0 + fall * 4.0, 2.0 - fall * fall * 6.0),
            Vec2::new(4.0, -12.0 * fall),
            MovementFlags {
                falling: true,
                fast_falling: fall > 0.5,
                facing: Facing::Right,
                ..Default::default()
            },
        )
    } else {
        // Landed; walk the cavern floor through the gallery.
        let x = 39.0 + (t - 6.5) * 3.0;
        (
            Vec2::new(x, -11.5),
            Vec2::new(3.0, 0.0),
            MovementFlags {
                grounded: true,
                facing: Facing::Right,
                ..Default::default()
            },
        )
    };

    TargetSnapshot::new(position, velocity, flags)
}
