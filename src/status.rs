use crate::error::KefError;
use crate::types::STANDBY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Power state as seen by the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// A speaker is off exactly when its source is standby
    pub fn from_source(source: Option<&str>) -> Self {
        match source {
            Some(STANDBY) => PowerState::Off,
            _ => PowerState::On,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PowerState::On => "on",
            PowerState::Off => "off",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = KefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(PowerState::On),
            "off" => Ok(PowerState::Off),
            other => Err(KefError::InvalidArgument(format!("invalid power state: {}", other))),
        }
    }
}

/// Normalized view of a speaker, rebuilt on every status request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub power: PowerState,
    /// Volume in `0..=100`
    pub volume: Option<u8>,
    pub source: Option<String>,
    pub muted: Option<bool>,
    /// Speaker-reported power status, e.g. `poweredOn`
    pub raw_speaker_status: Option<String>,
}

impl Status {
    /// Derive the normalized status from the four raw reads
    pub fn from_reads(
        volume: Option<i32>,
        source: Option<String>,
        muted: Option<bool>,
        raw_speaker_status: Option<String>,
    ) -> Self {
        Self {
            power: PowerState::from_source(source.as_deref()),
            volume: volume.map(clamp_volume),
            source,
            muted,
            raw_speaker_status,
        }
    }

    pub fn is_on(&self) -> bool {
        self.power == PowerState::On
    }
}

/// Clamp a raw volume into the `0..=100` range the speaker accepts
pub fn clamp_volume(level: i32) -> u8 {
    // clamp guarantees the cast is lossless
    level.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standby_source_means_off() {
        let status = Status::from_reads(Some(20), Some("standby".into()), Some(true), Some("poweredOn".into()));
        assert_eq!(status.power, PowerState::Off);
    }

    #[test]
    fn any_other_source_means_on() {
        for source in [Some("wifi".to_string()), Some("usb".to_string()), Some("Standby".to_string()), None] {
            let status = Status::from_reads(None, source, None, None);
            assert_eq!(status.power, PowerState::On);
        }
    }

    #[test]
    fn clamps_reported_volume() {
        assert_eq!(clamp_volume(-4), 0);
        assert_eq!(clamp_volume(42), 42);
        assert_eq!(clamp_volume(250), 100);
    }

    #[test]
    fn serializes_like_panel_api() {
        let status = Status::from_reads(Some(42), Some("wifi".into()), Some(false), Some("poweredOn".into()));
        assert_eq!(
            serde_json::to_value(&status).unwrap(),
            json!({
                "power": "on",
                "volume": 42,
                "source": "wifi",
                "muted": false,
                "raw_speaker_status": "poweredOn",
            })
        );
    }

    #[test]
    fn power_state_parses_on_off_only() {
        assert_eq!("on".parse::<PowerState>().unwrap(), PowerState::On);
        assert_eq!("off".parse::<PowerState>().unwrap(), PowerState::Off);
        assert!(matches!("standby".parse::<PowerState>(), Err(KefError::InvalidArgument(_))));
    }
}
