use std::collections::HashMap;

use color_eyre::Result;
use derive_builder::Builder;
use serde::{Deserialize, Deserializer};

use crate::{
    protocols::http::{mk_get_request, HyperHttpClient},
    settings::Settings,
};

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Idle,
    PendingLoop,
    Single,
    Loop,
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "idle",
            Mode::PendingLoop => "pending_loop",
            Mode::Single => "single",
            Mode::Loop => "loop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    On,
    Off,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::On => "on",
            Phase::Off => "off",
        }
    }
}

/// The server reports "no phase" as an empty string, so anything other than
/// `on`/`off` is treated as absent.
fn deserialize_phase<'de, D>(deserializer: D) -> Result<Option<Phase>, D::Error>
where
    D: Deserializer<'de>,
{
    let phase: Option<String> = Option::deserialize(deserializer)?;

    Ok(match phase.as_deref() {
        Some("on") => Some(Phase::On),
        Some("off") => Some(Phase::Off),
        _ => None,
    })
}

#[derive(Builder, Deserialize, Debug, Clone, Default, PartialEq)]
#[builder(setter(into, strip_option), default)]
pub struct DeviceStatus {
    pub mode: Mode,

    #[serde(default, deserialize_with = "deserialize_phase")]
    pub phase: Option<Phase>,

    #[serde(default)]
    pub phase_left: Option<u64>,

    #[serde(default)]
    pub seconds_left: Option<u64>,

    #[serde(default)]
    pub percent: Option<f64>,
}

/// Every device the server knows about, keyed by device key.
pub type StatusSnapshot = HashMap<String, DeviceStatus>;

pub async fn get_status(settings: &Settings, client: &HyperHttpClient) -> Result<StatusSnapshot> {
    let uri = settings.api_uri("/api/status")?;

    let snapshot: StatusSnapshot =
        mk_get_request(client, &uri, settings.request_timeout()).await?;

    Ok(snapshot)
}
