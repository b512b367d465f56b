//! Business logic: suppression state machine and command dispatch

mod dispatch;
mod suppression;

pub use dispatch::{CommandDispatcher, CommandResponse, MUTE_COMMAND, UNMUTE_COMMAND};
pub use suppression::{StreamLevel, SuppressionController, VolumeSnapshot};
