//! Debug operations console.
//!
//! A small set of named operations for manual testing -- force a phase
//! change, toggle invincibility, list the active entities. Not part of the
//! gameplay contract; hosts typically bind these to function keys outside
//! the gameplay input filter.

use wordfall_ecs::prelude::{EntityId, RenderKind};

use crate::context::GameContext;
use crate::machine::{PhaseParams, StateMachine};
use crate::GameError;

/// One row of the entity listing.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityInfo {
    /// Entity handle.
    pub id: EntityId,
    /// Word text, if the entity has one.
    pub word: Option<String>,
    /// Render variant, if the entity is drawable.
    pub kind: Option<RenderKind>,
    /// Vertical position.
    pub y: Option<f64>,
    /// Active flag.
    pub active: bool,
}

/// Borrowed console over a running game.
pub struct DebugOps<'a> {
    machine: &'a mut StateMachine,
    ctx: &'a mut GameContext,
}

impl<'a> DebugOps<'a> {
    pub(crate) fn new(machine: &'a mut StateMachine, ctx: &'a mut GameContext) -> Self {
        Self { machine, ctx }
    }

    /// Jump straight to a phase.
    ///
    /// # Errors
    ///
    /// [`GameError::UnknownPhase`] for an unregistered name; the game stays
    /// where it is.
    pub fn force_phase(&mut self, name: &str) -> Result<(), GameError> {
        tracing::info!(phase = name, "ops: forcing phase");
        self.machine.change(self.ctx, name, PhaseParams::default())
    }

    /// Toggle invincibility on the active phase. Returns the new state, or
    /// `None` if the phase has no such notion.
    pub fn toggle_god_mode(&mut self) -> Option<bool> {
        let result = self.machine.current_phase_mut()?.toggle_god_mode();
        if let Some(enabled) = result {
            tracing::info!(enabled, "ops: god mode");
        }
        result
    }

    /// Describe the active phase's entities.
    pub fn list_entities(&self) -> Vec<EntityInfo> {
        self.machine
            .current_phase()
            .map(|p| p.debug_entities())
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
