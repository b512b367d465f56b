//! Windows Core Audio adapter.
//!
//! The notification stream maps onto the "system sounds" audio session
//! (the one Windows plays its chimes through); the system stream maps
//! onto the default render endpoint's master volume. Scalar volumes
//! (0.0..=1.0) are exposed as integer levels 0..=100.

use windows::core::ComInterface;
use windows::Win32::Foundation::S_OK;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::{
    eConsole, eRender, IAudioSessionControl2, IAudioSessionManager2, IMMDevice,
    IMMDeviceEnumerator, ISimpleAudioVolume, MMDeviceEnumerator,
};
use windows::Win32::System::Com::{CoCreateInstance, CoInitializeEx, CLSCTX_ALL, COINIT_MULTITHREADED};

use crate::data::AudioConfig;
use crate::platform::{AdapterError, Stream, StreamAdapter};

const LEVEL_MIN: i64 = 0;
const LEVEL_MAX: i64 = 100;

pub struct CoreAudioAdapter;

impl CoreAudioAdapter {
    /// Create the adapter, verifying the default render endpoint exists.
    pub fn new(_config: &AudioConfig) -> Result<Self, AdapterError> {
        default_endpoint().map_err(AdapterError::unavailable)?;
        Ok(Self)
    }

    /// Read the scalar volume backing a stream.
    fn scalar_volume(&self, stream: Stream) -> Result<f32, AdapterError> {
        let device = default_endpoint().map_err(AdapterError::unavailable)?;
        match stream {
            Stream::System => unsafe {
                let endpoint: IAudioEndpointVolume = device
                    .Activate(CLSCTX_ALL, None)
                    .map_err(|e| AdapterError::stream_op(stream, e))?;
                endpoint
                    .GetMasterVolumeLevelScalar()
                    .map_err(|e| AdapterError::stream_op(stream, e))
            },
            Stream::Notification => unsafe {
                let volume = system_sounds_volume(&device)
                    .map_err(|e| AdapterError::stream_op(stream, e))?;
                volume
                    .GetMasterVolume()
                    .map_err(|e| AdapterError::stream_op(stream, e))
            },
        }
    }

    /// Write the scalar volume backing a stream.
    fn set_scalar_volume(&self, stream: Stream, value: f32) -> Result<(), AdapterError> {
        let device = default_endpoint().map_err(AdapterError::unavailable)?;
        match stream {
            Stream::System => unsafe {
                let endpoint: IAudioEndpointVolume = device
                    .Activate(CLSCTX_ALL, None)
                    .map_err(|e| AdapterError::stream_op(stream, e))?;
                endpoint
                    .SetMasterVolumeLevelScalar(value, std::ptr::null())
                    .map_err(|e| AdapterError::stream_op(stream, e))
            },
            Stream::Notification => unsafe {
                let volume = system_sounds_volume(&device)
                    .map_err(|e| AdapterError::stream_op(stream, e))?;
                volume
                    .SetMasterVolume(value, std::ptr::null())
                    .map_err(|e| AdapterError::stream_op(stream, e))
            },
        }
    }
}

impl StreamAdapter for CoreAudioAdapter {
    fn stream_level(&self, stream: Stream) -> Result<i64, AdapterError> {
        let scalar = self.scalar_volume(stream)?;
        Ok((scalar * LEVEL_MAX as f32).round() as i64)
    }

    fn set_stream_level(&self, stream: Stream, level: i64) -> Result<(), AdapterError> {
        let level = level.clamp(LEVEL_MIN, LEVEL_MAX);
        self.set_scalar_volume(stream, level as f32 / LEVEL_MAX as f32)
    }

    fn level_range(&self, _stream: Stream) -> Result<(i64, i64), AdapterError> {
        Ok((LEVEL_MIN, LEVEL_MAX))
    }
}

/// Obtain the default render endpoint, initializing COM for this thread.
fn default_endpoint() -> windows::core::Result<IMMDevice> {
    unsafe {
        // S_FALSE (already initialized) is fine; only real failures matter.
        let _ = CoInitializeEx(None, COINIT_MULTITHREADED);
        let enumerator: IMMDeviceEnumerator =
            CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)?;
        enumerator.GetDefaultAudioEndpoint(eRender, eConsole)
    }
}

/// Find the session Windows routes its own notification sounds through.
unsafe fn system_sounds_volume(device: &IMMDevice) -> windows::core::Result<ISimpleAudioVolume> {
    let manager: IAudioSessionManager2 = device.Activate(CLSCTX_ALL, None)?;
    let sessions = manager.GetSessionEnumerator()?;
    let count = sessions.GetCount()?;

    for i in 0..count {
        let control = sessions.GetSession(i)?;
        let control2: IAudioSessionControl2 = control.cast()?;
        if control2.IsSystemSoundsSession() == S_OK {
            return control2.cast();
        }
    }

    Err(windows::core::Error::from(
        windows::Win32::Foundation::E_FAIL,
    ))
}
