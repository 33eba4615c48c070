//! Test helpers: an in-memory speaker and log setup

#![allow(dead_code)]

use async_trait::async_trait;
use kef_control::{KefError, KefSpeaker, Result, SettingValue, Transport, TransportCause};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Route library logs to the test output
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// In-memory speaker that echoes writes back on read
#[derive(Default)]
pub struct FakeSpeaker {
    settings: Mutex<HashMap<String, Value>>,
    failing: Mutex<HashSet<String>>,
    writes: Mutex<Vec<(String, SettingValue)>>,
    calls: AtomicUsize,
}

impl FakeSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a setting as if it had been written
    pub fn with_setting(self, path: &str, value: SettingValue) -> Self {
        let element = serde_json::to_value(&value).expect("envelope serializes");
        self.settings.lock().unwrap().insert(path.to_string(), element);
        self
    }

    /// Preload a raw `getData` element
    pub fn with_raw(self, path: &str, element: Value) -> Self {
        self.settings.lock().unwrap().insert(path.to_string(), element);
        self
    }

    /// Make every request for `path` fail like an unreachable speaker
    pub fn failing(self, path: &str) -> Self {
        self.failing.lock().unwrap().insert(path.to_string());
        self
    }

    pub fn into_speaker(self) -> (Arc<FakeSpeaker>, KefSpeaker) {
        let fake = Arc::new(self);
        let speaker = KefSpeaker::with_transport(fake.clone(), "fake-speaker");
        (fake, speaker)
    }

    /// Number of requests the proxy made
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> Vec<(String, SettingValue)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last_write(&self) -> Option<(String, SettingValue)> {
        self.writes.lock().unwrap().last().cloned()
    }

    fn check_reachable(&self, path: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(path) {
            return Err(KefError::Transport {
                endpoint: path.to_string(),
                cause: TransportCause::Timeout(Duration::from_secs(5)),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for FakeSpeaker {
    async fn get_data(&self, path: &str, _role: &str) -> Result<Option<Map<String, Value>>> {
        self.check_reachable(path)?;
        let settings = self.settings.lock().unwrap();
        Ok(settings.get(path).and_then(Value::as_object).cloned())
    }

    async fn set_data(&self, path: &str, _role: &str, value: &SettingValue) -> Result<()> {
        self.check_reachable(path)?;
        let element = serde_json::to_value(value).expect("envelope serializes");
        self.settings.lock().unwrap().insert(path.to_string(), element);
        self.writes.lock().unwrap().push((path.to_string(), value.clone()));
        Ok(())
    }
}
