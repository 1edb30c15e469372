#![forbid(unsafe_code)]

//! Body-map model (headless).
//!
//! Design goals:
//! - a closed set of anatomical regions with static, exhaustively matched lookup tables
//! - a small interaction state machine (hover, selection, read-only, delegation)
//! - no I/O: asset loading and SVG output live in `bodymap-render`

pub mod body_part;
pub mod condition;
pub mod config;
pub mod error;
pub mod interaction;
pub mod label;
pub mod tables;

pub use body_part::BodyPart;
pub use condition::{Condition, ConditionIndex};
pub use config::BodyMapConfig;
pub use error::{Error, Result};
pub use interaction::{Interaction, InteractionOutcome, InteractionState};
pub use label::format_label;
pub use tables::Placement;
