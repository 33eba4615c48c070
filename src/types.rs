use crate::config::ProxyConfig;
use crate::error::Result;
use crate::speaker::KefSpeaker;
use crate::status::PowerState;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Speaker record identifier
pub type SpeakerId = String;

/// Source that puts the speaker into standby
pub const STANDBY: &str = "standby";

/// Physical source value that wakes the speaker; not a selectable source
pub const POWER_ON: &str = "powerOn";

/// Sources accepted by [`KefSpeaker::set_source`]
pub const VALID_SOURCES: [&str; 9] = [
    "wifi",
    "bluetooth",
    "tv",
    "optic",
    "coaxial",
    "analog",
    "standby",
    "optical",
    "usb",
];

/// Whether `name` is a selectable source
pub fn is_valid_source(name: &str) -> bool {
    VALID_SOURCES.contains(&name)
}

/// Identity information read from a speaker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub model_name: Option<String>,
    pub device_name: Option<String>,
    pub firmware_version: Option<String>,
    pub mac_address: Option<String>,
}

/// Control command as sent by the dashboard, e.g. `{"action":"setVolume","value":35}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "camelCase")]
pub enum ControlAction {
    SetPower(PowerState),
    SetVolume(i32),
    SetSource(String),
    Mute,
    Unmute,
    TogglePlayPause,
    NextTrack,
    PrevTrack,
}

/// A registered speaker as persisted by the control panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerRecord {
    pub id: SpeakerId,
    /// User-provided name
    pub name: String,
    pub ip: String,
    /// Model name reported by the speaker at registration
    pub model: Option<String>,
    /// Device name reported by the speaker at registration
    pub device_name: Option<String>,
}

impl SpeakerRecord {
    /// Create a record for a new speaker, probing it for model and device name
    ///
    /// An unreachable speaker is still registered, with the probed fields left
    /// empty. Only a malformed address is an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kef_control::{ProxyConfig, SpeakerRecord};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let record = SpeakerRecord::register("Living Room", "192.168.1.50", &ProxyConfig::default()).await?;
    ///     println!("{} is a {:?}", record.name, record.model);
    ///     Ok(())
    /// }
    /// ```
    pub async fn register(name: impl Into<String>, ip: impl Into<String>, config: &ProxyConfig) -> Result<Self> {
        let mut record = Self {
            id: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            ip: ip.into(),
            model: None,
            device_name: None,
        };
        record.probe(config).await?;
        Ok(record)
    }

    /// Point the record at a new address and re-probe it
    pub async fn set_ip(&mut self, ip: impl Into<String>, config: &ProxyConfig) -> Result<()> {
        self.ip = ip.into();
        self.probe(config).await
    }

    /// Proxy for this record's speaker
    pub fn speaker(&self, config: &ProxyConfig) -> Result<KefSpeaker> {
        KefSpeaker::new(&self.ip, config)
    }

    async fn probe(&mut self, config: &ProxyConfig) -> Result<()> {
        let speaker = self.speaker(config)?;
        let (model, device_name) = tokio::join!(speaker.get_model_name(), speaker.get_device_name());

        self.model = model.unwrap_or_else(|e| {
            warn!(ip = %self.ip, error = %e, "Failed to probe model name");
            None
        });
        self.device_name = device_name.unwrap_or_else(|e| {
            warn!(ip = %self.ip, error = %e, "Failed to probe device name");
            None
        });
        Ok(())
    }
}
