//! Scripted headless run -- proves the whole core works without a renderer.
//!
//! Run with:
//!   cargo run --example headless_session -p wordfall-game
//!
//! Boots to the menu, starts a run, types whatever is falling for a while,
//! then prints the final scoreboard. Set RUST_LOG=debug for tick detail.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use wordfall_game::prelude::*;

/// A frontend that prints the interesting events instead of drawing them.
#[derive(Default)]
struct ConsoleFrontend {
    next_visual: u64,
    last_hud: HudSnapshot,
}

impl RenderSink for ConsoleFrontend {
    fn create(
        &mut self,
        _entity: EntityId,
        descriptor: &RenderDescriptor,
        word: &Word,
        at: Position,
    ) -> VisualId {
        self.next_visual += 1;
        println!(
            "  [{:?}] \"{}\" enters lane x={:.0}",
            descriptor.kind, word.text, at.x
        );
        VisualId(self.next_visual)
    }

    fn moved(&mut self, _visual: VisualId, _at: Position) {}
    fn highlight(&mut self, _visual: VisualId, _matched: usize) {}

    fn destroy(&mut self, visual: VisualId) {
        println!("  visual #{} released", visual.0);
    }
}

impl AudioSink for ConsoleFrontend {
    fn play(&mut self, cue: SoundCue) {
        if matches!(cue, SoundCue::Damage | SoundCue::LevelUp | SoundCue::Victory) {
            println!("  cue: {cue:?}");
        }
    }
}

impl UiSink for ConsoleFrontend {
    fn hud(&mut self, snapshot: &HudSnapshot) {
        if snapshot.score != self.last_hud.score || snapshot.lives != self.last_hud.lives {
            println!(
                "  score {:>6}  lives {}  level {}  streak {}",
                snapshot.score, snapshot.lives, snapshot.level, snapshot.streak
            );
        }
        self.last_hud = *snapshot;
    }

    fn flash_damage(&mut self) {}
    fn shake_input(&mut self) {}
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let frontend = Frontend {
        render: Box::new(ConsoleFrontend::default()),
        audio: Box::new(ConsoleFrontend::default()),
        ui: Box::new(ConsoleFrontend::default()),
    };

    let mut game = Game::new(
        GameConfig::default(),
        frontend,
        Box::new(MemoryScoreStore::new()),
        WordBank::default(),
        0xDECAF,
    );

    let dt = 1.0 / 60.0;

    // Boot to the menu and start a run.
    game.frame(dt);
    game.frame(dt);
    println!("phase: {:?}", game.current_phase());
    game.key(Key::Enter);
    game.frame(dt);
    game.frame(dt);
    println!("phase: {:?}", game.current_phase());

    // Play 30 simulated seconds: type whatever is falling, press Enter
    // through the interludes.
    for _ in 0..(30 * 60) {
        let phase = game.current_phase().map(str::to_owned);
        if matches!(
            phase.as_deref(),
            Some(names::LORE) | Some(names::BRIEFING) | Some(names::GAMEOVER)
        ) {
            game.key(Key::Enter);
        } else {
            let target: Option<String> = {
                let listing = game.ops().list_entities();
                listing
                    .iter()
                    .find(|e| e.active && e.word.is_some())
                    .and_then(|e| e.word.clone())
            };
            if let Some(target) = target {
                for c in target.chars() {
                    game.key(Key::Char(c));
                }
            }
        }
        game.frame(dt);
    }

    println!("phase: {:?}", game.current_phase());
    println!("best score: {}", game.context().scores.best_score());
    for entry in game.context().scores.leaderboard() {
        println!("  {} {:>6}", entry.name, entry.score);
    }

    game.stop();
    Ok(())
}
