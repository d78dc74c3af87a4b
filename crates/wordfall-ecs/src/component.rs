//! The closed component registry.
//!
//! Every component kind the game uses is known at compile time. Each kind is
//! a plain data record with no behavior; the [`Component`] trait wires a
//! record type to its slot in a [`ComponentSet`] so store access is fully
//! typed -- there is no string or `TypeId` lookup anywhere.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Component records
// ---------------------------------------------------------------------------

/// 2D position in screen-space pixels. Origin at the top-left, y grows down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// 2D velocity in pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal velocity.
    pub dx: f64,
    /// Vertical velocity.
    pub dy: f64,
}

/// The target text the player must type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Current target text.
    pub text: String,
    /// The unmutated form the entity was spawned with.
    pub original: String,
}

impl Word {
    /// Build a word whose current and original text are the same.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            text,
        }
    }
}

/// What kind of visual a falling entity gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderKind {
    /// Regular falling word.
    Normal,
    /// Boss-encounter word.
    Boss,
    /// Transient power-up.
    Powerup,
    /// Story/lore word.
    Story,
}

/// Opaque handle to a visual resource created by the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u64);

/// Describes how an entity should be drawn.
///
/// `visual` starts as `None` and is filled in by render sync the first time
/// the entity is seen; it is released again when the entity goes inactive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDescriptor {
    /// Which visual variant to use.
    pub kind: RenderKind,
    /// Avatar/asset reference (file stem, meaningless to the core).
    pub avatar: String,
    /// Handle to the created visual resource, if one exists yet.
    pub visual: Option<VisualId>,
}

impl RenderDescriptor {
    /// Descriptor with no visual created yet.
    pub fn new(kind: RenderKind, avatar: impl Into<String>) -> Self {
        Self {
            kind,
            avatar: avatar.into(),
            visual: None,
        }
    }
}

/// Spawn-lane assignment, `index` in `[0, lane_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    /// Lane index, left to right.
    pub index: u8,
}

// ---------------------------------------------------------------------------
// ComponentKind / ComponentSet
// ---------------------------------------------------------------------------

/// Discriminant for the closed set of component kinds, used in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// [`Position`]
    Position,
    /// [`Velocity`]
    Velocity,
    /// [`Word`]
    Word,
    /// [`RenderDescriptor`]
    Render,
    /// [`Lane`]
    Lane,
}

/// One slot per component kind; a kind appears at most once per entity by
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentSet {
    pub(crate) position: Option<Position>,
    pub(crate) velocity: Option<Velocity>,
    pub(crate) word: Option<Word>,
    pub(crate) render: Option<RenderDescriptor>,
    pub(crate) lane: Option<Lane>,
}

impl ComponentSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given kind is present.
    pub fn has(&self, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Position => self.position.is_some(),
            ComponentKind::Velocity => self.velocity.is_some(),
            ComponentKind::Word => self.word.is_some(),
            ComponentKind::Render => self.render.is_some(),
            ComponentKind::Lane => self.lane.is_some(),
        }
    }

    /// Whether every kind in `kinds` is present.
    pub fn has_all(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|&k| self.has(k))
    }

    /// Add a component, builder-style. Overwrites a previous value of the
    /// same kind.
    pub fn with<C: Component>(mut self, value: C) -> Self {
        *C::slot_mut(&mut self) = Some(value);
        self
    }
}

// ---------------------------------------------------------------------------
// Component trait
// ---------------------------------------------------------------------------

/// Maps a record type to its [`ComponentSet`] slot.
///
/// Implemented only for the five kinds above; the set is closed on purpose.
pub trait Component: Sized {
    /// The kind discriminant for this record type.
    const KIND: ComponentKind;

    /// Borrow this type's slot.
    fn slot(set: &ComponentSet) -> &Option<Self>;

    /// Mutably borrow this type's slot.
    fn slot_mut(set: &mut ComponentSet) -> &mut Option<Self>;
}

macro_rules! impl_component {
    ($ty:ty, $kind:ident, $field:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$kind;

            fn slot(set: &ComponentSet) -> &Option<Self> {
                &set.$field
            }

            fn slot_mut(set: &mut ComponentSet) -> &mut Option<Self> {
                &mut set.$field
            }
        }
    };
}

impl_component!(Position, Position, position);
impl_component!(Velocity, Velocity, velocity);
impl_component!(Word, Word, word);
impl_component!(RenderDescriptor, Render, render);
impl_component!(Lane, Lane, lane);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
