//! Kingdom Quest simulation core: zone generation, the live entity store,
//! the per-tick update, combat, quests and the UI notification stream.
//!
//! Rendering and raw input live in the binary; everything here runs
//! headless and is driven through [`GameState::step`].

pub mod catalog;
pub mod clock;
pub mod combat;
pub mod config;
pub mod effects;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod item;
pub mod notify;
pub mod player;
pub mod quest;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod ui;
pub mod update;
pub mod zone;

pub use config::{AttackClock, ConfigError, GameConfig};
pub use error::ActionError;
pub use input::{Command, Controls, InputFrame, InputSource, ScriptedInput};
pub use notify::{Notification, Severity, UiSink};
pub use snapshot::{FrameSink, FrameSnapshot};
pub use state::{CommandOutcome, GamePhase, GameState};
pub use ui::MessageLog;
pub use update::{TickStep, TICK_ORDER};
pub use zone::{generate_zone, ZoneError, ZoneState};
