//! The phase state machine.
//!
//! Exactly one phase is active at a time. A transition validates the target
//! name first, then runs `exit` on the old phase and `enter` on the new one;
//! an unregistered target is reported and leaves the machine exactly where it
//! was. Per-tick `update`/`render` are plain delegation, with the update
//! dispatch hardened so one faulty phase cannot take the scheduler down.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::context::GameContext;
use crate::GameError;

/// Data handed to a phase on entry. All optional; phases fall back to their
/// own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseParams {
    /// Level to run at.
    pub level: Option<u32>,
    /// Score carried across phases of the same run.
    pub score: Option<u64>,
    /// Phase to return to when this one concludes.
    pub next: Option<String>,
}

impl PhaseParams {
    /// Params carrying a level.
    pub fn at_level(level: u32) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    /// Params carrying a run's level and score.
    pub fn for_run(level: u32, score: u64) -> Self {
        Self {
            level: Some(level),
            score: Some(score),
            ..Self::default()
        }
    }
}

/// A top-level game phase (menu, playing, boss, ...).
///
/// `enter`/`exit`/`render` default to no-ops; only `update` is mandatory.
/// Each phase owns its cleanup: `exit` must release everything the phase
/// created so a later `enter` starts from a clean slate.
pub trait Phase {
    /// The phase became active.
    fn enter(&mut self, _ctx: &mut GameContext, _params: &PhaseParams) {}

    /// The phase is being left.
    fn exit(&mut self, _ctx: &mut GameContext) {}

    /// One fixed simulation step.
    fn update(&mut self, ctx: &mut GameContext, dt: f64);

    /// One render pass with the interpolation fraction.
    fn render(&mut self, _ctx: &mut GameContext, _alpha: f64) {}

    /// Debug hook: toggle invincibility. Returns the new state, or `None`
    /// when the phase has no such notion.
    fn toggle_god_mode(&mut self) -> Option<bool> {
        None
    }

    /// Debug hook: describe the phase's live entities.
    fn debug_entities(&self) -> Vec<crate::ops::EntityInfo> {
        Vec::new()
    }
}

/// Name-keyed registry of phases with one active at a time.
#[derive(Default)]
pub struct StateMachine {
    phases: HashMap<String, Box<dyn Phase>>,
    current: Option<String>,
}

impl StateMachine {
    /// An empty machine with no active phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a phase under `name`.
    ///
    /// # Panics
    ///
    /// Panics if the name is already taken.
    pub fn register(&mut self, name: &str, phase: Box<dyn Phase>) {
        let prev = self.phases.insert(name.to_owned(), phase);
        assert!(prev.is_none(), "duplicate phase name: {name:?}");
    }

    /// The active phase's name.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switch to `name`: exit the active phase, enter the target, mark it
    /// current.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPhase`] if `name` is not registered. The error is
    /// also logged, and the machine stays on the previous phase with no
    /// partial transition.
    pub fn change(
        &mut self,
        ctx: &mut GameContext,
        name: &str,
        params: PhaseParams,
    ) -> Result<(), GameError> {
        if !self.phases.contains_key(name) {
            tracing::error!(phase = name, "phase not registered, staying put");
            return Err(GameError::UnknownPhase(name.to_owned()));
        }

        if let Some(active) = self.current.take() {
            if let Some(phase) = self.phases.get_mut(&active) {
                phase.exit(ctx);
            }
            tracing::info!(from = %active, to = name, "phase change");
        } else {
            tracing::info!(to = name, "phase change");
        }

        if let Some(phase) = self.phases.get_mut(name) {
            phase.enter(ctx, &params);
        }
        self.current = Some(name.to_owned());
        Ok(())
    }

    /// Delegate one simulation step to the active phase. A panic inside the
    /// phase is caught and logged so the tick dispatch survives; no-op when
    /// no phase is active.
    pub fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        let Some(name) = self.current.clone() else {
            return;
        };
        if let Some(phase) = self.phases.get_mut(&name) {
            let result = catch_unwind(AssertUnwindSafe(|| phase.update(ctx, dt)));
            if let Err(payload) = result {
                let msg = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_owned());
                tracing::error!(phase = %name, %msg, "phase update panicked; tick continues");
            }
        }
    }

    /// Delegate the render pass to the active phase.
    pub fn render(&mut self, ctx: &mut GameContext, alpha: f64) {
        let Some(name) = self.current.clone() else {
            return;
        };
        if let Some(phase) = self.phases.get_mut(&name) {
            phase.render(ctx, alpha);
        }
    }

    /// Mutable access to the active phase (debug ops).
    pub(crate) fn current_phase_mut(&mut self) -> Option<&mut Box<dyn Phase>> {
        let name = self.current.clone()?;
        self.phases.get_mut(&name)
    }

    /// Shared access to the active phase (debug ops).
    pub(crate) fn current_phase(&self) -> Option<&dyn Phase> {
        let name = self.current.as_deref()?;
        self.phases.get(name).map(|b| b.as_ref())
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.phases.keys().map(|s| s.as_str()).collect();
        names.sort();
        f.debug_struct("StateMachine")
            .field("current", &self.current)
            .field("registered", &names)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
