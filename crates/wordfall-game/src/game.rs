//! Top-level assembly: the state machine, the context, and the frame clock
//! wired together behind one handle the host drives.

use crate::clock::{FixedTimestep, TickDriver};
use crate::config::GameConfig;
use crate::content::WordBank;
use crate::context::GameContext;
use crate::frontend::Frontend;
use crate::input::Key;
use crate::machine::{PhaseParams, StateMachine};
use crate::ops::DebugOps;
use crate::persist::ScoreStore;
use crate::states::{
    names, BossPhase, BriefingPhase, GameOverPhase, LoadingPhase, LorePhase, MenuPhase,
    PlayingPhase,
};

/// Chained same-frame transitions are bounded; beyond this something is
/// requesting phases from `enter`, which is a bug worth surfacing.
const MAX_CHAINED_TRANSITIONS: u32 = 8;

/// The whole game behind one handle.
///
/// The host forwards key events via [`key`](Game::key) and calls
/// [`frame`](Game::frame) once per display frame with the elapsed real time;
/// everything else is internal.
pub struct Game {
    machine: StateMachine,
    ctx: GameContext,
    clock: FixedTimestep,
}

impl Game {
    /// Assemble the game and enter the loading phase.
    pub fn new(
        config: GameConfig,
        frontend: Frontend,
        scores: Box<dyn ScoreStore>,
        bank: WordBank,
        seed: u64,
    ) -> Self {
        let clock = FixedTimestep::new(config.fixed_step, config.max_accumulator);

        let mut machine = StateMachine::new();
        machine.register(names::LOADING, Box::new(LoadingPhase::new()));
        machine.register(names::MENU, Box::new(MenuPhase::new()));
        machine.register(names::PLAYING, Box::new(PlayingPhase::new(&config, seed)));
        machine.register(
            names::BOSS,
            Box::new(BossPhase::new(&config, seed.wrapping_add(1))),
        );
        machine.register(names::LORE, Box::new(LorePhase::new()));
        machine.register(names::BRIEFING, Box::new(BriefingPhase::new()));
        machine.register(names::GAMEOVER, Box::new(GameOverPhase::new()));

        let mut ctx = GameContext::new(config, frontend, scores, bank, seed);

        // The loading phase is registered above; entering it cannot fail.
        machine
            .change(&mut ctx, names::LOADING, PhaseParams::default())
            .unwrap_or_else(|err| tracing::error!(error = %err, "boot transition failed"));

        Self {
            machine,
            ctx,
            clock,
        }
    }

    /// Advance by `elapsed` real seconds. Pending phase requests are applied
    /// first, so transitions requested mid-tick land at a frame boundary.
    /// Returns the number of simulation steps executed.
    pub fn frame(&mut self, elapsed: f64) -> u32 {
        self.apply_pending_transitions();

        struct Driver<'a> {
            machine: &'a mut StateMachine,
            ctx: &'a mut GameContext,
        }
        impl TickDriver for Driver<'_> {
            fn update(&mut self, dt: f64) {
                self.machine.update(self.ctx, dt);
            }
            fn render(&mut self, alpha: f64) {
                self.machine.render(self.ctx, alpha);
            }
        }

        let mut driver = Driver {
            machine: &mut self.machine,
            ctx: &mut self.ctx,
        };
        self.clock.frame(elapsed, &mut driver)
    }

    fn apply_pending_transitions(&mut self) {
        let mut hops = 0;
        while let Some((name, params)) = self.ctx.take_request() {
            hops += 1;
            if hops > MAX_CHAINED_TRANSITIONS {
                tracing::error!(phase = %name, "transition chain runaway, dropping request");
                break;
            }
            // An unknown target is already logged by the machine; the game
            // simply stays where it is.
            let _ = self.machine.change(&mut self.ctx, &name, params);
        }
    }

    /// Buffer a gameplay key.
    pub fn key(&mut self, key: Key) {
        self.ctx.input.push(key);
    }

    /// Filter and buffer a host key event by name.
    pub fn key_event(&mut self, name: &str) {
        if let Some(key) = Key::from_event(name) {
            self.key(key);
        }
    }

    /// Halt the frame clock; later [`frame`](Game::frame) calls do nothing.
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Whether the clock is still running.
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Name of the active phase.
    pub fn current_phase(&self) -> Option<&str> {
        self.machine.current()
    }

    /// The debug-operations console.
    pub fn ops(&mut self) -> DebugOps<'_> {
        DebugOps::new(&mut self.machine, &mut self.ctx)
    }

    /// The shared context (tests and embedding hosts).
    pub fn context(&self) -> &GameContext {
        &self.ctx
    }

    /// Mutable context access (tests and embedding hosts).
    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.ctx
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.machine.current())
            .field("running", &self.clock.is_running())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
