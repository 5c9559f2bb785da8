use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glam::Vec3;
use hecs::Entity;
use tracing::{info, Level};

use pickplant::app::DemoApp;
use pickplant::components::PickEvent;
use pickplant::engine::input::Button;
use pickplant::{ActorConfig, Result};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Grab and throw a bomb, run, then stop.
    Run,
    /// Get picked up, then wriggle free with the throw button.
    Capture,
    /// Get thrown, then land early with the throw button.
    Fly,
    /// Die twice in a row, then respawn.
    Kill,
}

#[derive(Parser)]
#[command(name = "pickplant", about = "Headless player controller demo")]
struct Args {
    #[arg(long, value_enum, default_value_t = Scenario::Run)]
    scenario: Scenario,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 90)]
    frames: u64,
    /// Frame time in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0, value_parser = parse_frame_time)]
    dt: f32,
    /// TOML file with actor tunables.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Raw kill cause code used by the kill scenario.
    #[arg(long, default_value_t = 1)]
    cause: u8,
    /// Log every state transition.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let config = match &args.config {
        Some(path) => ActorConfig::load(path)?,
        None => ActorConfig::default(),
    };

    let mut app = DemoApp::new(config)?;
    info!(bombs = app.bombs().len(), "scene loaded");
    let deaths = app.player_mut().on_death(|event| {
        info!(actor = %event.actor, cause = %event.cause, "death observed");
    });

    for frame in 0..args.frames {
        script(&mut app, &args, frame)?;
        let report = app.step(args.dt);
        info!(
            frame = report.frame,
            state = ?report.state,
            steps = report.physics_steps,
            alpha = report.alpha,
            inputs = report.input_events,
            x = report.position.x,
            y = report.position.y,
            z = report.position.z,
            "frame"
        );
    }

    app.player_mut().remove_death_listener(deaths);
    app.player_mut().teardown();
    Ok(())
}

fn parse_frame_time(raw: &str) -> std::result::Result<f32, String> {
    let dt: f32 = raw.parse().map_err(|e| format!("{e}"))?;
    if !dt.is_finite() || dt <= 0.0 {
        return Err(format!("frame time must be positive and finite, got {raw}"));
    }
    Ok(dt)
}

/// Feed the scenario's inputs and external events before frame `frame`.
fn script(app: &mut DemoApp, args: &Args, frame: u64) -> Result<()> {
    let half = args.frames / 2;
    match args.scenario {
        Scenario::Run => match frame {
            0 => {
                let grabbed: Option<Entity> = app.grab_nearest();
                info!(?grabbed, "grab");
            }
            5 => app.input().borrow_mut().press(Button::Throw),
            6 => app.input().borrow_mut().release(Button::Throw),
            8 => app.input().borrow_mut().press(Button::RestoreCollisions),
            10 => app.input().borrow_mut().set_direction(Vec3::X),
            f if f == half => app.input().borrow_mut().set_direction(Vec3::ZERO),
            _ => {}
        },
        Scenario::Capture => match frame {
            10 => {
                app.notify_pickup(PickEvent::Picked);
            }
            30 => app.input().borrow_mut().press(Button::Throw),
            _ => {}
        },
        Scenario::Fly => match frame {
            5 => {
                app.player_mut().transform.position.y = 2.0;
                app.notify_pickup(PickEvent::Thrown);
            }
            20 => app.input().borrow_mut().press(Button::Throw),
            _ => {}
        },
        Scenario::Kill => match frame {
            10 | 11 => {
                let processed = app.player_mut().kill_by_code(args.cause)?;
                info!(processed, "kill reported");
            }
            f if f == half => app.complete_respawn(),
            _ => {}
        },
    }
    Ok(())
}
