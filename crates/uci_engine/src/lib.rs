//! UCI protocol front end.
//!
//! [`UciSession`] owns the current position and one search [`Strategy`], and
//! answers one command per input line. [`EngineSettings`] is the settings
//! file the engine binary starts from.

mod session;
mod settings;
mod strategy;

pub use session::{Flow, SessionError, UciSession};
pub use settings::{EngineSettings, EvaluatorKind, SettingsError};
pub use strategy::{Strategy, StrategyKind};
