//! Render, audio, and HUD collaborator boundaries.
//!
//! These are one-way event sinks: the core pushes "entity created/moved/
//! destroyed", "play sound X", and HUD snapshots outward and never consults a
//! return value beyond the visual handle it must hold for cleanup. The
//! [`NullFrontend`] runs the game fully headless; the [`RecordingFrontend`]
//! captures the event stream for test assertions.

use std::cell::RefCell;
use std::rc::Rc;

use wordfall_ecs::prelude::{EntityId, Position, RenderDescriptor, VisualId, Word};

// ---------------------------------------------------------------------------
// Sink traits
// ---------------------------------------------------------------------------

/// Sound cues the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A keystroke extended the prefix.
    Type,
    /// A word was completed.
    Success,
    /// A keystroke matched nothing.
    Error,
    /// A word reached the kill-zone.
    Damage,
    /// Level counter advanced.
    LevelUp,
    /// A power-up was caught.
    Powerup,
    /// A boss encounter was cleared.
    Victory,
}

/// Creates, moves, highlights, and destroys visual resources for entities.
pub trait RenderSink {
    /// Create the visual for an entity; the returned handle is stored on the
    /// entity's [`RenderDescriptor`] and passed back for later events.
    fn create(
        &mut self,
        entity: EntityId,
        descriptor: &RenderDescriptor,
        word: &Word,
        at: Position,
    ) -> VisualId;

    /// The entity moved.
    fn moved(&mut self, visual: VisualId, at: Position);

    /// `matched` characters of the word's displayed text should read as
    /// typed, the rest as pending.
    fn highlight(&mut self, visual: VisualId, matched: usize);

    /// Release the visual resource.
    fn destroy(&mut self, visual: VisualId);
}

/// Plays sound cues. Fire-and-forget.
pub trait AudioSink {
    /// Play the cue.
    fn play(&mut self, cue: SoundCue);
}

/// Per-tick HUD values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudSnapshot {
    /// Current score.
    pub score: u64,
    /// Remaining lives.
    pub lives: u32,
    /// Current level.
    pub level: u32,
    /// Current streak.
    pub streak: u32,
    /// Best score on record.
    pub best: u64,
}

/// Receives HUD updates and transient screen effects.
pub trait UiSink {
    /// Refresh the HUD.
    fn hud(&mut self, snapshot: &HudSnapshot);

    /// A life was just lost; show the damage disturbance.
    fn flash_damage(&mut self);

    /// A keystroke missed; shake the input display.
    fn shake_input(&mut self);
}

/// The three sinks bundled, as passed through the game context.
pub struct Frontend {
    /// Visual resource sink.
    pub render: Box<dyn RenderSink>,
    /// Sound cue sink.
    pub audio: Box<dyn AudioSink>,
    /// HUD sink.
    pub ui: Box<dyn UiSink>,
}

impl Frontend {
    /// A frontend that swallows everything; the core runs headless.
    pub fn null() -> Self {
        Self {
            render: Box::new(NullFrontend::default()),
            audio: Box::new(NullFrontend::default()),
            ui: Box::new(NullFrontend::default()),
        }
    }
}

impl std::fmt::Debug for Frontend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontend").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// NullFrontend
// ---------------------------------------------------------------------------

/// No-op sink; hands out sequential visual ids so handle bookkeeping still
/// gets exercised.
#[derive(Debug, Default)]
pub struct NullFrontend {
    next_visual: u64,
}

impl RenderSink for NullFrontend {
    fn create(
        &mut self,
        _entity: EntityId,
        _descriptor: &RenderDescriptor,
        _word: &Word,
        _at: Position,
    ) -> VisualId {
        self.next_visual += 1;
        VisualId(self.next_visual)
    }

    fn moved(&mut self, _visual: VisualId, _at: Position) {}
    fn highlight(&mut self, _visual: VisualId, _matched: usize) {}
    fn destroy(&mut self, _visual: VisualId) {}
}

impl AudioSink for NullFrontend {
    fn play(&mut self, _cue: SoundCue) {}
}

impl UiSink for NullFrontend {
    fn hud(&mut self, _snapshot: &HudSnapshot) {}
    fn flash_damage(&mut self) {}
    fn shake_input(&mut self) {}
}

// ---------------------------------------------------------------------------
// RecordingFrontend (test support)
// ---------------------------------------------------------------------------

/// One recorded frontend event.
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Visual created for an entity.
    Created(EntityId, VisualId),
    /// Visual moved.
    Moved(VisualId, f64, f64),
    /// Highlight state changed.
    Highlight(VisualId, usize),
    /// Visual destroyed.
    Destroyed(VisualId),
    /// Sound cue played.
    Sound(SoundCue),
    /// HUD refreshed.
    Hud(HudSnapshot),
    /// Damage flash requested.
    DamageFlash,
    /// Input shake requested.
    InputShake,
}

/// Shared handle to the recorded event log.
pub type FrontendLog = Rc<RefCell<Vec<FrontendEvent>>>;

/// Records every event for assertions. The simulation is single-threaded, so
/// the log is shared with plain `Rc<RefCell<_>>`.
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    log: FrontendLog,
    next_visual: u64,
}

impl RecordingFrontend {
    /// Build a recording [`Frontend`] plus the shared log to inspect later.
    pub fn frontend() -> (Frontend, FrontendLog) {
        let log: FrontendLog = Rc::default();
        let frontend = Frontend {
            render: Box::new(Self {
                log: Rc::clone(&log),
                next_visual: 0,
            }),
            audio: Box::new(Self {
                log: Rc::clone(&log),
                next_visual: 0,
            }),
            ui: Box::new(Self {
                log: Rc::clone(&log),
                next_visual: 0,
            }),
        };
        (frontend, log)
    }

    fn push(&self, event: FrontendEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl RenderSink for RecordingFrontend {
    fn create(
        &mut self,
        entity: EntityId,
        _descriptor: &RenderDescriptor,
        _word: &Word,
        _at: Position,
    ) -> VisualId {
        self.next_visual += 1;
        let visual = VisualId(self.next_visual);
        self.push(FrontendEvent::Created(entity, visual));
        visual
    }

    fn moved(&mut self, visual: VisualId, at: Position) {
        self.push(FrontendEvent::Moved(visual, at.x, at.y));
    }

    fn highlight(&mut self, visual: VisualId, matched: usize) {
        self.push(FrontendEvent::Highlight(visual, matched));
    }

    fn destroy(&mut self, visual: VisualId) {
        self.push(FrontendEvent::Destroyed(visual));
    }
}

impl AudioSink for RecordingFrontend {
    fn play(&mut self, cue: SoundCue) {
        self.push(FrontendEvent::Sound(cue));
    }
}

impl UiSink for RecordingFrontend {
    fn hud(&mut self, snapshot: &HudSnapshot) {
        self.push(FrontendEvent::Hud(*snapshot));
    }

    fn flash_damage(&mut self) {
        self.push(FrontendEvent::DamageFlash);
    }

    fn shake_input(&mut self) {
        self.push(FrontendEvent::InputShake);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
