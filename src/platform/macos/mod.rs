//! macOS volume adapter driven through `osascript`.
//!
//! macOS exposes the alert-tone volume and the general output volume as
//! two independently settable values in `(get volume settings)`. Alert
//! volume backs the notification stream, output volume the system
//! stream. Both ranges are fixed at 0..=100.

use std::process::Command;

use crate::data::AudioConfig;
use crate::platform::{AdapterError, Stream, StreamAdapter};

const LEVEL_MIN: i64 = 0;
const LEVEL_MAX: i64 = 100;

pub struct OsascriptAdapter;

impl OsascriptAdapter {
    pub fn new(_config: &AudioConfig) -> Self {
        Self
    }

    fn run_script(&self, stream: Stream, script: &str) -> Result<String, AdapterError> {
        let output = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|e| AdapterError::stream_op(stream, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdapterError::stream_op(stream, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn volume_keyword(stream: Stream) -> &'static str {
        match stream {
            Stream::Notification => "alert volume",
            Stream::System => "output volume",
        }
    }
}

impl StreamAdapter for OsascriptAdapter {
    fn stream_level(&self, stream: Stream) -> Result<i64, AdapterError> {
        let script = format!("{} of (get volume settings)", Self::volume_keyword(stream));
        let out = self.run_script(stream, &script)?;
        out.parse::<i64>().map_err(|e| {
            AdapterError::stream_op(stream, format!("unparseable volume '{}': {}", out, e))
        })
    }

    fn set_stream_level(&self, stream: Stream, level: i64) -> Result<(), AdapterError> {
        let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        let script = format!("set volume {} {}", Self::volume_keyword(stream), level);
        self.run_script(stream, &script).map(|_| ())
    }

    fn level_range(&self, _stream: Stream) -> Result<(i64, i64), AdapterError> {
        Ok((LEVEL_MIN, LEVEL_MAX))
    }
}
