//! Registry of speaker-side setting paths

use crate::protocol::{ValueType, ROLE_VALUE};

/// A setting the proxy knows how to read or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    PhysicalSource,
    Volume,
    Mute,
    DeviceName,
    ModelName,
    FirmwareVersion,
    MacAddress,
    SpeakerStatus,
}

/// Where a setting lives on the speaker and how its value is typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingPath {
    pub path: &'static str,
    pub value_type: ValueType,
    pub role: &'static str,
}

impl Setting {
    pub const ALL: [Setting; 8] = [
        Setting::PhysicalSource,
        Setting::Volume,
        Setting::Mute,
        Setting::DeviceName,
        Setting::ModelName,
        Setting::FirmwareVersion,
        Setting::MacAddress,
        Setting::SpeakerStatus,
    ];

    pub fn descriptor(self) -> SettingPath {
        let (path, value_type) = match self {
            Setting::PhysicalSource => ("settings:/kef/play/physicalSource", ValueType::PhysicalSource),
            Setting::Volume => ("player:volume", ValueType::I32),
            Setting::Mute => ("settings:/mediaPlayer/mute", ValueType::Bool),
            Setting::DeviceName => ("settings:/deviceName", ValueType::String),
            Setting::ModelName => ("settings:/kef/host/modelName", ValueType::String),
            Setting::FirmwareVersion => ("settings:/version", ValueType::String),
            Setting::MacAddress => ("settings:/system/primaryMacAddress", ValueType::String),
            Setting::SpeakerStatus => ("settings:/kef/host/speakerStatus", ValueType::SpeakerStatus),
        };
        SettingPath {
            path,
            value_type,
            role: ROLE_VALUE,
        }
    }

    pub fn path(self) -> &'static str {
        self.descriptor().path
    }

    pub fn value_type(self) -> ValueType {
        self.descriptor().value_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_speaker_api() {
        assert_eq!(Setting::PhysicalSource.path(), "settings:/kef/play/physicalSource");
        assert_eq!(Setting::Volume.path(), "player:volume");
        assert_eq!(Setting::Mute.path(), "settings:/mediaPlayer/mute");
        assert_eq!(Setting::DeviceName.path(), "settings:/deviceName");
        assert_eq!(Setting::ModelName.path(), "settings:/kef/host/modelName");
        assert_eq!(Setting::FirmwareVersion.path(), "settings:/version");
        assert_eq!(Setting::MacAddress.path(), "settings:/system/primaryMacAddress");
        assert_eq!(Setting::SpeakerStatus.path(), "settings:/kef/host/speakerStatus");
    }

    #[test]
    fn value_types_match_speaker_api() {
        assert_eq!(Setting::PhysicalSource.value_type(), ValueType::PhysicalSource);
        assert_eq!(Setting::Volume.value_type(), ValueType::I32);
        assert_eq!(Setting::Mute.value_type(), ValueType::Bool);
        assert_eq!(Setting::SpeakerStatus.value_type(), ValueType::SpeakerStatus);
        for setting in [
            Setting::DeviceName,
            Setting::ModelName,
            Setting::FirmwareVersion,
            Setting::MacAddress,
        ] {
            assert_eq!(setting.value_type(), ValueType::String);
        }
    }

    #[test]
    fn every_setting_uses_value_role() {
        assert!(Setting::ALL.iter().all(|s| s.descriptor().role == "value"));
    }
}
