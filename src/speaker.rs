use crate::config::ProxyConfig;
use crate::error::{KefError, Result};
use crate::protocol::SettingValue;
use crate::settings::Setting;
use crate::status::{clamp_volume, PowerState, Status};
use crate::transport::{DeviceAddress, HttpTransport, Transport};
use crate::types::{is_valid_source, ControlAction, DeviceInfo, POWER_ON, STANDBY, VALID_SOURCES};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Interface for controlling one KEF speaker
///
/// A `KefSpeaker` holds no connection and no cached state: every call is a
/// fresh request against the speaker, bounded by the configured timeout.
/// Clones share the underlying HTTP client.
#[derive(Clone)]
pub struct KefSpeaker {
    transport: Arc<dyn Transport>,
    label: String,
}

impl fmt::Debug for KefSpeaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KefSpeaker").field("label", &self.label).finish()
    }
}

impl KefSpeaker {
    /// Create a proxy for the speaker at `host`
    ///
    /// No request is made here. `host` may be a bare IP or a URL.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kef_control::{KefSpeaker, ProxyConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let speaker = KefSpeaker::new("192.168.1.50", &ProxyConfig::default())?;
    ///     speaker.set_volume(30).await?;
    ///     println!("{:?}", speaker.get_status().await?);
    ///     Ok(())
    /// }
    /// ```
    pub fn new(host: &str, config: &ProxyConfig) -> Result<Self> {
        let address = DeviceAddress::new(host)?;
        let label = address.to_string();
        let transport = HttpTransport::new(address, config)?;
        Ok(Self {
            transport: Arc::new(transport),
            label,
        })
    }

    /// Create a proxy over a custom transport
    pub fn with_transport(transport: Arc<dyn Transport>, label: impl Into<String>) -> Self {
        Self {
            transport,
            label: label.into(),
        }
    }

    /// Address or label this proxy talks to
    pub fn label(&self) -> &str {
        &self.label
    }

    /// All sources accepted by [`set_source`](Self::set_source)
    pub fn available_sources() -> &'static [&'static str] {
        &VALID_SOURCES
    }

    async fn read(&self, setting: Setting) -> Result<Option<SettingValue>> {
        let descriptor = setting.descriptor();
        let Some(element) = self.transport.get_data(descriptor.path, descriptor.role).await? else {
            return Ok(None);
        };

        SettingValue::decode(descriptor.value_type, &element).map_err(|cause| {
            warn!(speaker = %self.label, path = descriptor.path, error = %cause, "Undecodable setting value");
            KefError::transport(self.transport.read_endpoint(descriptor.path, descriptor.role), cause)
        })
    }

    async fn read_string(&self, setting: Setting) -> Result<Option<String>> {
        Ok(self.read(setting).await?.and_then(SettingValue::into_string))
    }

    async fn write(&self, setting: Setting, value: SettingValue) -> Result<()> {
        let descriptor = setting.descriptor();
        debug_assert_eq!(value.value_type(), descriptor.value_type);
        debug!(speaker = %self.label, path = descriptor.path, ?value, "Writing setting");
        self.transport.set_data(descriptor.path, descriptor.role, &value).await
    }

    // ========== Source / Power ==========

    /// Select the physical source; `standby` puts the speaker to sleep
    pub async fn set_source(&self, source: &str) -> Result<()> {
        if !is_valid_source(source) {
            return Err(KefError::InvalidArgument(format!("Invalid source: {}", source)));
        }
        self.write(Setting::PhysicalSource, SettingValue::PhysicalSource(source.to_string()))
            .await
    }

    /// Current physical source, e.g. `wifi` or `standby`
    pub async fn get_source(&self) -> Result<Option<String>> {
        self.read_string(Setting::PhysicalSource).await
    }

    /// Wake the speaker from standby
    pub async fn power_on(&self) -> Result<()> {
        self.write(Setting::PhysicalSource, SettingValue::PhysicalSource(POWER_ON.to_string()))
            .await
    }

    /// Put the speaker into standby
    pub async fn shutdown(&self) -> Result<()> {
        self.set_source(STANDBY).await
    }

    /// Switch power: `On` wakes the speaker, `Off` puts it into standby
    pub async fn set_power(&self, state: PowerState) -> Result<()> {
        match state {
            PowerState::On => self.power_on().await,
            PowerState::Off => self.shutdown().await,
        }
    }

    // ========== Volume / Mute ==========

    /// Set the volume; values outside `0..=100` are clamped
    pub async fn set_volume(&self, level: i32) -> Result<()> {
        let level = i32::from(clamp_volume(level));
        self.write(Setting::Volume, SettingValue::I32(level)).await
    }

    /// Current volume as reported by the speaker
    pub async fn get_volume(&self) -> Result<Option<i32>> {
        Ok(self.read(Setting::Volume).await?.and_then(|v| v.as_i32()))
    }

    /// Mute or unmute the speaker
    pub async fn set_mute(&self, muted: bool) -> Result<()> {
        self.write(Setting::Mute, SettingValue::Bool(muted)).await
    }

    /// Mute the speaker
    pub async fn mute(&self) -> Result<()> {
        self.set_mute(true).await
    }

    /// Unmute the speaker
    pub async fn unmute(&self) -> Result<()> {
        self.set_mute(false).await
    }

    /// Whether the speaker is muted
    pub async fn is_muted(&self) -> Result<Option<bool>> {
        Ok(self.read(Setting::Mute).await?.and_then(|v| v.as_bool()))
    }

    // ========== Identity ==========

    /// User-assigned speaker name
    pub async fn get_device_name(&self) -> Result<Option<String>> {
        self.read_string(Setting::DeviceName).await
    }

    /// Model name, e.g. `LSXII`
    pub async fn get_model_name(&self) -> Result<Option<String>> {
        self.read_string(Setting::ModelName).await
    }

    /// Installed firmware release
    pub async fn get_firmware_version(&self) -> Result<Option<String>> {
        self.read_string(Setting::FirmwareVersion).await
    }

    /// Primary network interface MAC address
    pub async fn get_mac_address(&self) -> Result<Option<String>> {
        self.read_string(Setting::MacAddress).await
    }

    /// Speaker-reported power status, e.g. `poweredOn` or `standby`
    pub async fn get_raw_speaker_status(&self) -> Result<Option<String>> {
        self.read_string(Setting::SpeakerStatus).await
    }

    /// Read model, device name, firmware and MAC address in one go
    pub async fn get_device_info(&self) -> Result<DeviceInfo> {
        let (model_name, device_name, firmware_version, mac_address) = tokio::try_join!(
            self.get_model_name(),
            self.get_device_name(),
            self.get_firmware_version(),
            self.get_mac_address()
        )?;
        Ok(DeviceInfo {
            model_name,
            device_name,
            firmware_version,
            mac_address,
        })
    }

    // ========== Status ==========

    /// Read volume, source, mute and speaker status and normalize them
    ///
    /// The reads run concurrently. If any of them fails the whole call fails;
    /// callers usually report the speaker as offline in that case.
    pub async fn get_status(&self) -> Result<Status> {
        let reads = tokio::try_join!(
            self.get_volume(),
            self.get_source(),
            self.is_muted(),
            self.get_raw_speaker_status()
        );

        match reads {
            Ok((volume, source, muted, raw_speaker_status)) => {
                Ok(Status::from_reads(volume, source, muted, raw_speaker_status))
            }
            Err(e) => {
                warn!(speaker = %self.label, error = %e, "Status read failed");
                Err(e)
            }
        }
    }

    // ========== Transport Controls ==========

    // No settings path for playback control is known for these speakers.

    /// Toggle playback; always [`KefError::Unsupported`]
    pub async fn toggle_play_pause(&self) -> Result<()> {
        Err(KefError::Unsupported("togglePlayPause"))
    }

    /// Skip to the next track; always [`KefError::Unsupported`]
    pub async fn next_track(&self) -> Result<()> {
        Err(KefError::Unsupported("nextTrack"))
    }

    /// Go back to the previous track; always [`KefError::Unsupported`]
    pub async fn prev_track(&self) -> Result<()> {
        Err(KefError::Unsupported("prevTrack"))
    }

    // ========== Dispatch ==========

    /// Run a dashboard control command
    pub async fn apply(&self, action: ControlAction) -> Result<()> {
        debug!(speaker = %self.label, ?action, "Applying control action");
        match action {
            ControlAction::SetPower(state) => self.set_power(state).await,
            ControlAction::SetVolume(level) => self.set_volume(level).await,
            ControlAction::SetSource(source) => self.set_source(&source).await,
            ControlAction::Mute => self.mute().await,
            ControlAction::Unmute => self.unmute().await,
            ControlAction::TogglePlayPause => self.toggle_play_pause().await,
            ControlAction::NextTrack => self.next_track().await,
            ControlAction::PrevTrack => self.prev_track().await,
        }
    }
}
