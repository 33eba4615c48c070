//! Rust library for controlling KEF networked speakers
//!
//! This library talks to the local HTTP settings API of KEF wireless
//! speakers (LS50 Wireless II, LSX II, LS60...). It supports:
//!
//! - Power on / standby
//! - Source selection
//! - Volume and mute control
//! - Identity reads (device name, model, firmware, MAC address)
//! - A normalized status view built from several raw reads
//!
//! Every operation is a single stateless request/response exchange bounded by
//! a timeout. There is no persistent connection and no retry.
//!
//! # Quick Start
//!
//! ```no_run
//! use kef_control::{KefSpeaker, ProxyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let speaker = KefSpeaker::new("192.168.1.50", &ProxyConfig::default())?;
//!
//!     speaker.power_on().await?;
//!     speaker.set_source("optical").await?;
//!     speaker.set_volume(35).await?;
//!
//!     match speaker.get_status().await {
//!         Ok(status) => println!("{:?}", status),
//!         Err(e) if e.is_unreachable() => println!("speaker offline: {}", e),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Speaker**: high-level operations, input validation and status normalization
//! - **Settings**: registry of setting paths and their value types
//! - **Protocol**: typed value envelopes and their JSON codec
//! - **Transport**: HTTP requests against the speaker with timeout and response checks
//! - **Types**: speaker records and the dashboard control vocabulary

mod config;
mod error;
mod protocol;
mod settings;
mod speaker;
mod status;
mod transport;
mod types;

// Public exports
pub use config::{ProxyConfig, DEFAULT_TIMEOUT};
pub use error::{KefError, Result, TransportCause};
pub use protocol::{SettingValue, ValueType, ROLE_VALUE};
pub use settings::{Setting, SettingPath};
pub use speaker::KefSpeaker;
pub use status::{clamp_volume, PowerState, Status};
pub use transport::{DeviceAddress, HttpTransport, Transport};
pub use types::{
    is_valid_source, ControlAction, DeviceInfo, SpeakerId, SpeakerRecord, POWER_ON, STANDBY,
    VALID_SOURCES,
};
