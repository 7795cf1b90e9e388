/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use config::GameConfig;
use sim::engine::GameEngine;
use sim::event::GameEvent;
use ui::input::{self, InputAction};
use ui::renderer::Renderer;

fn main() {
    let config = GameConfig::load();
    let mut engine = GameEngine::new(config.rules.clone(), config.seed);
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut engine, &mut renderer);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!(
        "Dig complete. Level {}, {} turns, score {}.",
        engine.level_number(),
        engine.turn_number(),
        engine.score(),
    );
}

fn game_loop(
    engine: &mut GameEngine,
    renderer: &mut Renderer,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut message = String::new();
    renderer.render(&engine.snapshot(), &message)?;

    loop {
        let events = match input::read_action()? {
            InputAction::Quit => break,
            InputAction::Redraw => {
                renderer.render(&engine.snapshot(), &message)?;
                continue;
            }
            InputAction::Move(dir) => engine.advance_turn(Some(dir)),
            InputAction::Wait => engine.advance_turn(None),
        };
        message = describe_events(&events).unwrap_or_default();
        renderer.render(&engine.snapshot(), &message)?;
    }

    Ok(())
}

/// Pick the most notable event of the turn for the HUD message line.
fn describe_events(events: &[GameEvent]) -> Option<String> {
    let mut best: Option<(u8, String)> = None;
    for event in events {
        let (rank, text) = match event {
            GameEvent::LevelComplete { level } => {
                (5, format!("All ore cleared! Descending to level {level}"))
            }
            GameEvent::MoleExploded { .. } => (4, "A mole detonated!".to_string()),
            GameEvent::StrengthBoosted => {
                (3, "Uranium surge! Mining strength raised".to_string())
            }
            GameEvent::TileMined { kind, .. } => (2, format!("Mined {kind:?}")),
            GameEvent::Refueled => (1, "Refueled at base".to_string()),
            GameEvent::MoleRemoved { .. } => continue,
        };
        if best.as_ref().map_or(true, |(r, _)| rank > *r) {
            best = Some((rank, text));
        }
    }
    best.map(|(_, text)| text)
}
