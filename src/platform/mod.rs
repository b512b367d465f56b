use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::data::AudioConfig;

/// An OS-level audio stream managed by the suppression controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    /// Notification / alert tones (speech recognition beeps live here).
    Notification,
    /// General system sounds.
    System,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Notification => "notification",
            Stream::System => "system",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by platform adapters.
///
/// These never abort a controller state transition; the controller
/// collects them and reports them as diagnostics.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The OS audio service/session handle could not be obtained at all.
    #[error("audio service unavailable: {cause}")]
    AdapterUnavailable { cause: String },
    /// One specific stream's get/set call failed.
    #[error("operation on {stream} stream failed: {cause}")]
    StreamOperationFailed { stream: Stream, cause: String },
}

impl AdapterError {
    pub fn unavailable(cause: impl fmt::Display) -> Self {
        AdapterError::AdapterUnavailable {
            cause: cause.to_string(),
        }
    }

    pub fn stream_op(stream: Stream, cause: impl fmt::Display) -> Self {
        AdapterError::StreamOperationFailed {
            stream,
            cause: cause.to_string(),
        }
    }
}

/// The audio session state that was in effect before suppression began.
///
/// `None` is the explicit "no session was active" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PriorSession {
    #[default]
    None,
    Category(String),
}

/// Trait for platforms that expose per-stream integer volumes.
///
/// Calls are synchronous and never retry; a failure is final for that call.
pub trait StreamAdapter: Send + Sync {
    /// Read the current level of a stream.
    fn stream_level(&self, stream: Stream) -> Result<i64, AdapterError>;
    /// Write a stream's level.
    fn set_stream_level(&self, stream: Stream, level: i64) -> Result<(), AdapterError>;
    /// The platform-reported `(min, max)` range for a stream.
    fn level_range(&self, stream: Stream) -> Result<(i64, i64), AdapterError>;
}

/// Trait for platforms that model audio as session categories rather
/// than per-stream volumes.
pub trait SessionAdapter: Send + Sync {
    /// Switch into the suppressed session configuration, returning the
    /// session state that was active beforehand.
    fn activate_suppressed_session(&self) -> Result<PriorSession, AdapterError>;
    /// Leave the suppressed session, handing back the prior state.
    fn deactivate_session(&self, prior: &PriorSession) -> Result<(), AdapterError>;
}

/// One platform's adapter, wrapped by capability set.
pub enum PlatformAdapter {
    Streams(Box<dyn StreamAdapter>),
    Session(Box<dyn SessionAdapter>),
}

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

/// Factory for creating the platform-specific adapter.
pub struct PlatformFactory;

impl PlatformFactory {
    pub fn create_adapter(config: &AudioConfig) -> Result<PlatformAdapter, AdapterError> {
        #[cfg(target_os = "linux")]
        return Ok(PlatformAdapter::Streams(Box::new(
            linux::AlsaMixerAdapter::new(config)?,
        )));
        #[cfg(target_os = "macos")]
        return Ok(PlatformAdapter::Streams(Box::new(
            macos::OsascriptAdapter::new(config),
        )));
        #[cfg(target_os = "windows")]
        return Ok(PlatformAdapter::Streams(Box::new(
            windows::CoreAudioAdapter::new(config)?,
        )));
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        {
            let _ = config;
            Err(AdapterError::unavailable("unsupported platform"))
        }
    }
}
