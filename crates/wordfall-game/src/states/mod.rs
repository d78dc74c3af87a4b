//! The top-level game phases.
//!
//! `loading → menu → playing ⇄ boss → lore → briefing → playing → ... →
//! gameover → menu`. Each phase owns its own cleanup in `exit`.

pub mod boss;
pub mod briefing;
pub mod gameover;
pub mod loading;
pub mod lore;
pub mod menu;
pub mod playing;

pub use boss::BossPhase;
pub use briefing::BriefingPhase;
pub use gameover::GameOverPhase;
pub use loading::LoadingPhase;
pub use lore::LorePhase;
pub use menu::MenuPhase;
pub use playing::PlayingPhase;

/// Registered phase names.
pub mod names {
    /// Asset warm-up.
    pub const LOADING: &str = "loading";
    /// Title screen.
    pub const MENU: &str = "menu";
    /// The main run.
    pub const PLAYING: &str = "playing";
    /// Boss encounter.
    pub const BOSS: &str = "boss";
    /// Story interlude.
    pub const LORE: &str = "lore";
    /// Next-threat briefing.
    pub const BRIEFING: &str = "briefing";
    /// Run finished.
    pub const GAMEOVER: &str = "gameover";
}
