//! ALSA simple-mixer adapter.
//!
//! Maps the managed streams onto mixer controls of one card: the system
//! stream onto `Master` and the notification stream onto `Beep` by
//! default (both names configurable).

use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};

use crate::data::AudioConfig;
use crate::platform::{AdapterError, Stream, StreamAdapter};

pub struct AlsaMixerAdapter {
    device: String,
    notification_control: String,
    system_control: String,
}

impl AlsaMixerAdapter {
    /// Create the adapter, verifying the mixer device can be opened.
    pub fn new(config: &AudioConfig) -> Result<Self, AdapterError> {
        Mixer::new(&config.mixer_device, false).map_err(AdapterError::unavailable)?;

        tracing::debug!(device = %config.mixer_device, "ALSA mixer opened");

        Ok(Self {
            device: config.mixer_device.clone(),
            notification_control: config.notification_control.clone(),
            system_control: config.system_control.clone(),
        })
    }

    fn control_name(&self, stream: Stream) -> &str {
        match stream {
            Stream::Notification => &self.notification_control,
            Stream::System => &self.system_control,
        }
    }

    /// Open the mixer and run `op` against the stream's control.
    ///
    /// The mixer handle is not kept across calls; each get/set stands alone.
    fn with_selem<T>(
        &self,
        stream: Stream,
        op: impl FnOnce(&Selem) -> alsa::Result<T>,
    ) -> Result<T, AdapterError> {
        let mixer = Mixer::new(&self.device, false).map_err(AdapterError::unavailable)?;
        let name = self.control_name(stream);
        let selem = mixer
            .find_selem(&SelemId::new(name, 0))
            .ok_or_else(|| {
                AdapterError::stream_op(stream, format!("no mixer control named '{}'", name))
            })?;
        op(&selem).map_err(|e| AdapterError::stream_op(stream, e))
    }
}

impl StreamAdapter for AlsaMixerAdapter {
    fn stream_level(&self, stream: Stream) -> Result<i64, AdapterError> {
        self.with_selem(stream, |selem| {
            selem.get_playback_volume(SelemChannelId::FrontLeft)
        })
    }

    fn set_stream_level(&self, stream: Stream, level: i64) -> Result<(), AdapterError> {
        self.with_selem(stream, |selem| selem.set_playback_volume_all(level))
    }

    fn level_range(&self, stream: Stream) -> Result<(i64, i64), AdapterError> {
        self.with_selem(stream, |selem| Ok(selem.get_playback_volume_range()))
    }
}
