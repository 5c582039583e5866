use crate::api::status::{DeviceStatus, Mode, Phase};

pub const INACTIVE_LABEL: &str = "inactive";

/// Visual state of a device's status box. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBoxState {
    On,
    Off,
    Pending,
}

/// Flags derived from a single [`DeviceStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusFlags {
    pub active: bool,
    pub pending: bool,
    pub closed: bool,
}

impl From<&DeviceStatus> for StatusFlags {
    fn from(status: &DeviceStatus) -> Self {
        let active = status.mode != Mode::Idle;
        let pending = status.mode == Mode::PendingLoop;
        let closed = !pending
            && (status.mode == Mode::Single
                || (status.mode == Mode::Loop && status.phase == Some(Phase::On)));

        StatusFlags {
            active,
            pending,
            closed,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub flags: StatusFlags,
    pub box_state: StatusBoxState,
    pub indicator: String,
    pub counter: String,
    /// Progress bar width, in percent.
    pub progress: f64,
    pub mode_label: String,
    pub start_disabled: bool,
}

impl Default for StatusView {
    fn default() -> Self {
        render_status(&DeviceStatus::default())
    }
}

pub fn render_status(status: &DeviceStatus) -> StatusView {
    let flags = StatusFlags::from(status);
    let phase_left = status.phase_left.unwrap_or(0);

    let box_state = if flags.pending {
        StatusBoxState::Pending
    } else if flags.closed {
        StatusBoxState::On
    } else {
        StatusBoxState::Off
    };

    let indicator = match box_state {
        StatusBoxState::Pending => format!("preparing loop ({} s)", phase_left),
        StatusBoxState::On => format!("relay closed ({} s)", phase_left),
        StatusBoxState::Off => format!("relay open ({} s)", phase_left),
    };

    let counter = match (flags.active, status.seconds_left) {
        (true, Some(seconds_left)) => seconds_left.to_string(),
        _ => String::new(),
    };

    let mode_label = if flags.active {
        match status.phase {
            Some(phase) => format!("{} ({})", status.mode.name(), phase.name()),
            None => status.mode.name().to_string(),
        }
    } else {
        INACTIVE_LABEL.to_string()
    };

    StatusView {
        flags,
        box_state,
        indicator,
        counter,
        progress: status.percent.unwrap_or(0.0).clamp(0.0, 100.0),
        mode_label,
        start_disabled: flags.active,
    }
}
