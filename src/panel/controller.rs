use crate::api::{
    commands::{Command, CommandSender, LoopRequest, SingleRequest},
    status::DeviceStatus,
};

use super::{
    draft::DeviceDraft,
    view::{render_status, StatusView},
};

/// A device from the registry. Fixed for the lifetime of the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub key: String,
    pub icon: String,
    pub label: String,
}

/// Owns one device's draft and its last rendered status.
#[derive(Debug, Clone)]
pub struct DeviceController {
    pub device: Device,
    pub draft: DeviceDraft,
    status: StatusView,
}

impl DeviceController {
    pub fn new(device: Device) -> Self {
        DeviceController {
            device,
            draft: DeviceDraft::default(),
            status: StatusView::default(),
        }
    }

    pub fn status(&self) -> &StatusView {
        &self.status
    }

    pub fn render_status(&mut self, status: &DeviceStatus) {
        self.status = render_status(status);
    }

    pub fn single_request(&self) -> Option<SingleRequest> {
        let seconds = self.draft.single_seconds();

        if seconds == 0 {
            return None;
        }

        Some(SingleRequest {
            device: self.device.key.clone(),
            seconds,
        })
    }

    pub fn loop_request(&self) -> Option<LoopRequest> {
        let on_seconds = self.draft.on_seconds();
        let off_seconds = self.draft.off_seconds();
        let total_seconds = self.draft.total_seconds();

        if on_seconds == 0 || off_seconds == 0 || total_seconds == 0 {
            return None;
        }

        Some(LoopRequest {
            device: self.device.key.clone(),
            on_seconds,
            off_seconds,
            total_seconds,
        })
    }

    /// Returns whether a request was submitted.
    pub fn start_single(&self, sender: &CommandSender) -> bool {
        self.submit(sender, self.single_request().map(Command::Single))
    }

    pub fn start_loop(&self, sender: &CommandSender) -> bool {
        self.submit(sender, self.loop_request().map(Command::Loop))
    }

    fn submit(&self, sender: &CommandSender, command: Option<Command>) -> bool {
        if self.status.start_disabled {
            log::debug!("{} is active, ignoring start", self.device.key);
            return false;
        }

        match command {
            Some(command) => {
                sender.submit(command);
                true
            }
            None => false,
        }
    }
}
