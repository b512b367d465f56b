//! Suppression controller
//!
//! Owns the mute/restore state machine. While a voice feature is
//! capturing, the OS streams that produce notification and system tones
//! are held at their minimum level; the levels seen immediately before
//! muting are captured and written back afterwards.
//!
//! Adapter failures never abort a transition. A device latched in the
//! muted state is a far worse outcome than one stream missing its
//! restore, so both operations always complete their transition and
//! report what went wrong as diagnostics.
//!
//! Not safe for concurrent invocation: callers must serialize
//! `suppress()`/`restore()` (the binary funnels all commands through a
//! single dispatch loop).

use crate::platform::{AdapterError, PlatformAdapter, PriorSession, Stream};

/// One captured stream level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamLevel {
    pub stream: Stream,
    pub level: i64,
}

/// Pre-suppression audio state, captured at the moment muting begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeSnapshot {
    /// Per-stream levels read from the OS right before they were muted.
    Streams(Vec<StreamLevel>),
    /// Session state in effect before the suppressed session was activated.
    Session(PriorSession),
}

/// The snapshot lives inside `Active`, so it exists exactly when
/// suppression is applied and cannot outlive it.
#[derive(Debug)]
enum SuppressionState {
    Inactive,
    Active(VolumeSnapshot),
}

pub struct SuppressionController {
    adapter: PlatformAdapter,
    managed: Vec<Stream>,
    state: SuppressionState,
}

impl SuppressionController {
    pub fn new(adapter: PlatformAdapter, managed: Vec<Stream>) -> Self {
        Self {
            adapter,
            managed,
            state: SuppressionState::Inactive,
        }
    }

    /// Whether suppression is currently applied.
    pub fn is_active(&self) -> bool {
        matches!(self.state, SuppressionState::Active(_))
    }

    /// Capture current levels and mute the managed streams.
    ///
    /// Idempotent: a second call while active performs no adapter calls
    /// and keeps the original snapshot. The transition to active always
    /// happens, even if every adapter call fails, so that a later
    /// `restore()` attempt is guaranteed to be paired with this call.
    pub fn suppress(&mut self) -> Vec<AdapterError> {
        if self.is_active() {
            tracing::debug!("suppress: already active, keeping original snapshot");
            return Vec::new();
        }

        let mut diagnostics = Vec::new();

        let snapshot = match &self.adapter {
            PlatformAdapter::Streams(adapter) => {
                let mut captured = Vec::new();
                for &stream in &self.managed {
                    // A stream whose level cannot be read is skipped
                    // entirely: muting it would leave nothing to restore.
                    let level = match adapter.stream_level(stream) {
                        Ok(level) => level,
                        Err(e) => {
                            tracing::warn!(%stream, error = %e, "skipping stream, level unreadable");
                            diagnostics.push(e);
                            continue;
                        }
                    };
                    captured.push(StreamLevel { stream, level });

                    // The captured level stays in the snapshot even when
                    // the mute write fails; restoring a level the stream
                    // already has is harmless.
                    match adapter.level_range(stream) {
                        Ok((min, _)) => {
                            if let Err(e) = adapter.set_stream_level(stream, min) {
                                tracing::warn!(%stream, error = %e, "failed to mute stream");
                                diagnostics.push(e);
                            }
                        }
                        Err(e) => {
                            tracing::warn!(%stream, error = %e, "failed to read level range");
                            diagnostics.push(e);
                        }
                    }
                }
                VolumeSnapshot::Streams(captured)
            }
            PlatformAdapter::Session(adapter) => match adapter.activate_suppressed_session() {
                Ok(prior) => VolumeSnapshot::Session(prior),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to activate suppressed session");
                    diagnostics.push(e);
                    VolumeSnapshot::Session(PriorSession::None)
                }
            },
        };

        self.state = SuppressionState::Active(snapshot);
        tracing::info!(
            diagnostics = diagnostics.len(),
            "system sounds suppressed"
        );
        diagnostics
    }

    /// Write the captured levels back and drop the snapshot.
    ///
    /// Idempotent: with no pending suppression this performs no adapter
    /// calls. Partial failure on one stream does not block the others,
    /// and the transition to inactive is unconditional.
    pub fn restore(&mut self) -> Vec<AdapterError> {
        let snapshot = match std::mem::replace(&mut self.state, SuppressionState::Inactive) {
            SuppressionState::Inactive => {
                tracing::debug!("restore: nothing to restore");
                return Vec::new();
            }
            SuppressionState::Active(snapshot) => snapshot,
        };

        let mut diagnostics = Vec::new();

        match snapshot {
            VolumeSnapshot::Streams(captured) => {
                if let PlatformAdapter::Streams(adapter) = &self.adapter {
                    for entry in &captured {
                        if let Err(e) = adapter.set_stream_level(entry.stream, entry.level) {
                            tracing::warn!(stream = %entry.stream, error = %e, "failed to restore stream");
                            diagnostics.push(e);
                        }
                    }
                }
            }
            VolumeSnapshot::Session(prior) => {
                if let PlatformAdapter::Session(adapter) = &self.adapter {
                    if let Err(e) = adapter.deactivate_session(&prior) {
                        tracing::warn!(error = %e, "failed to deactivate session");
                        diagnostics.push(e);
                    }
                }
            }
        }

        tracing::info!(diagnostics = diagnostics.len(), "system sounds restored");
        diagnostics
    }
}
