//! hush-bridge - system-sound suppression for voice capture
//!
//! Temporarily silences the OS streams that produce notification and
//! system tones while a speech feature is listening, then restores the
//! exact pre-mute levels afterwards.

pub mod business;
pub mod data;
pub mod platform;

pub use business::{CommandDispatcher, CommandResponse, SuppressionController};
pub use data::AppConfig;
pub use platform::{AdapterError, PlatformAdapter, PlatformFactory, Stream};
