use std::{collections::HashSet, time::Duration};

use color_eyre::Result;
use eyre::eyre;
use hyper::Uri;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct ServerSettings {
    pub url: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

// Devices are a list rather than a table keyed by device key: config folds
// table keys to lowercase, and the key has to reach the server verbatim.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct DeviceSettings {
    pub key: String,
    pub icon: String,
    pub label: String,
}

#[derive(Clone, Deserialize, Debug)]
pub struct Settings {
    pub server: ServerSettings,

    #[serde(default = "default_devices")]
    pub devices: Vec<DeviceSettings>,
}

/// The two relays wired up on the reference deployment.
fn default_devices() -> Vec<DeviceSettings> {
    vec![
        DeviceSettings {
            key: "air".to_string(),
            icon: "🌬️".to_string(),
            label: "Aire".to_string(),
        },
        DeviceSettings {
            key: "power".to_string(),
            icon: "⚡".to_string(),
            label: "Electricidad".to_string(),
        },
    ]
}

impl Settings {
    pub fn api_uri(&self, path: &str) -> Result<Uri> {
        let uri = format!("{}{}", self.server.url.trim_end_matches('/'), path).parse()?;
        Ok(uri)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    fn validate(self) -> Result<Self> {
        let uri: Uri = self
            .server
            .url
            .parse()
            .map_err(|e| eyre!("Invalid server url {:?}: {}", self.server.url, e))?;

        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => {
                return Err(eyre!(
                    "Server url {:?} must start with http:// or https://",
                    self.server.url
                ))
            }
        }

        if self.server.poll_interval_ms == 0 {
            return Err(eyre!("server.poll_interval_ms must be greater than zero"));
        }

        if self.server.request_timeout_ms == 0 {
            return Err(eyre!("server.request_timeout_ms must be greater than zero"));
        }

        let mut seen = HashSet::new();
        for device in &self.devices {
            if !seen.insert(device.key.as_str()) {
                return Err(eyre!("Device key {:?} is configured twice", device.key));
            }
        }

        Ok(self)
    }
}

fn mk_settings_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
    let builder = config::Config::builder()
        .set_default("server.url", "http://127.0.0.1:666")?
        .set_default("server.poll_interval_ms", 300)?
        .set_default("server.request_timeout_ms", 5000)?;

    Ok(builder)
}

pub fn read_settings() -> Result<Settings> {
    let settings = mk_settings_builder()?
        .add_source(config::File::with_name("Settings").required(false))
        .add_source(config::Environment::with_prefix("RELAY_PANEL").separator("__"))
        .build()?
        .try_deserialize::<Settings>()?;

    settings.validate()
}
