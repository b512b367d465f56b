//! Command surface
//!
//! The application layer drives the bridge with exactly two commands,
//! mirroring the method-channel vocabulary of the host application:
//! `muteSystemSounds` and `unmuteSystemSounds`. Anything else is a
//! caller error and gets a not-implemented reply. The vocabulary is
//! closed; it must never grow silently.

use serde::Serialize;

use crate::business::SuppressionController;

pub const MUTE_COMMAND: &str = "muteSystemSounds";
pub const UNMUTE_COMMAND: &str = "unmuteSystemSounds";

/// Reply to one dispatched command.
///
/// `success` reflects "the state transition completed", which is always
/// the case for the two known commands; underlying OS failures travel in
/// `diagnostics` instead of failing the command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CommandResponse {
    Completed {
        success: bool,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        diagnostics: Vec<String>,
    },
    NotImplemented,
}

pub struct CommandDispatcher {
    controller: SuppressionController,
}

impl CommandDispatcher {
    pub fn new(controller: SuppressionController) -> Self {
        Self { controller }
    }

    /// Whether suppression is currently applied (for shutdown cleanup).
    pub fn is_suppressed(&self) -> bool {
        self.controller.is_active()
    }

    /// Restore without going through the command vocabulary, used when
    /// the process is shutting down while still suppressed.
    pub fn restore_on_shutdown(&mut self) {
        for diag in self.controller.restore() {
            tracing::warn!(error = %diag, "shutdown restore diagnostic");
        }
    }

    pub fn dispatch(&mut self, command: &str) -> CommandResponse {
        let diagnostics = match command {
            MUTE_COMMAND => self.controller.suppress(),
            UNMUTE_COMMAND => self.controller.restore(),
            other => {
                tracing::warn!(command = other, "unknown command");
                return CommandResponse::NotImplemented;
            }
        };

        CommandResponse::Completed {
            success: true,
            diagnostics: diagnostics.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AdapterError, PlatformAdapter, Stream, StreamAdapter};

    struct FlatMixer;

    impl StreamAdapter for FlatMixer {
        fn stream_level(&self, _stream: Stream) -> Result<i64, AdapterError> {
            Ok(7)
        }
        fn set_stream_level(&self, _stream: Stream, _level: i64) -> Result<(), AdapterError> {
            Ok(())
        }
        fn level_range(&self, _stream: Stream) -> Result<(i64, i64), AdapterError> {
            Ok((0, 100))
        }
    }

    struct BrokenMixer;

    impl StreamAdapter for BrokenMixer {
        fn stream_level(&self, stream: Stream) -> Result<i64, AdapterError> {
            Err(AdapterError::stream_op(stream, "nope"))
        }
        fn set_stream_level(&self, stream: Stream, _level: i64) -> Result<(), AdapterError> {
            Err(AdapterError::stream_op(stream, "nope"))
        }
        fn level_range(&self, stream: Stream) -> Result<(i64, i64), AdapterError> {
            Err(AdapterError::stream_op(stream, "nope"))
        }
    }

    fn dispatcher(adapter: Box<dyn StreamAdapter>) -> CommandDispatcher {
        CommandDispatcher::new(SuppressionController::new(
            PlatformAdapter::Streams(adapter),
            vec![Stream::Notification, Stream::System],
        ))
    }

    #[test]
    fn mute_and_unmute_complete() {
        let mut dispatcher = dispatcher(Box::new(FlatMixer));

        let reply = dispatcher.dispatch(MUTE_COMMAND);
        assert_eq!(
            reply,
            CommandResponse::Completed {
                success: true,
                diagnostics: Vec::new()
            }
        );
        assert!(dispatcher.is_suppressed());

        let reply = dispatcher.dispatch(UNMUTE_COMMAND);
        assert_eq!(
            reply,
            CommandResponse::Completed {
                success: true,
                diagnostics: Vec::new()
            }
        );
        assert!(!dispatcher.is_suppressed());
    }

    #[test]
    fn unknown_command_is_not_implemented() {
        let mut dispatcher = dispatcher(Box::new(FlatMixer));
        assert_eq!(
            dispatcher.dispatch("setStreamVolume"),
            CommandResponse::NotImplemented
        );
        assert!(!dispatcher.is_suppressed());
    }

    #[test]
    fn adapter_failures_surface_as_diagnostics_not_errors() {
        let mut dispatcher = dispatcher(Box::new(BrokenMixer));

        match dispatcher.dispatch(MUTE_COMMAND) {
            CommandResponse::Completed {
                success,
                diagnostics,
            } => {
                assert!(success);
                assert_eq!(diagnostics.len(), 2);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert!(dispatcher.is_suppressed());
    }

    #[test]
    fn redundant_unmute_reports_success() {
        let mut dispatcher = dispatcher(Box::new(FlatMixer));
        dispatcher.dispatch(MUTE_COMMAND);
        dispatcher.dispatch(UNMUTE_COMMAND);

        // Voice sessions can end via several paths that each try to
        // unmute; the extra calls must be harmless.
        let reply = dispatcher.dispatch(UNMUTE_COMMAND);
        assert_eq!(
            reply,
            CommandResponse::Completed {
                success: true,
                diagnostics: Vec::new()
            }
        );
    }

    #[test]
    fn responses_serialize_to_json() {
        let reply = CommandResponse::Completed {
            success: true,
            diagnostics: Vec::new(),
        };
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"{"result":"completed","success":true}"#
        );

        assert_eq!(
            serde_json::to_string(&CommandResponse::NotImplemented).unwrap(),
            r#"{"result":"not_implemented"}"#
        );
    }
}
