use crate::{api::status::StatusSnapshot, settings::Settings};

use super::controller::{Device, DeviceController};

/// All device controllers of the panel, in display order.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    controllers: Vec<DeviceController>,
}

impl Registry {
    pub fn new(devices: impl IntoIterator<Item = Device>) -> Self {
        Registry {
            controllers: devices.into_iter().map(DeviceController::new).collect(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Registry::new(settings.devices.iter().map(|device| Device {
            key: device.key.clone(),
            icon: device.icon.clone(),
            label: device.label.clone(),
        }))
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    pub fn controllers(&self) -> &[DeviceController] {
        &self.controllers
    }

    pub fn get(&self, index: usize) -> Option<&DeviceController> {
        self.controllers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DeviceController> {
        self.controllers.get_mut(index)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut DeviceController> {
        self.controllers.iter_mut().find(|c| c.device.key == key)
    }

    // Unknown keys are skipped; devices missing from the snapshot keep their
    // previous status.
    pub fn apply_snapshot(&mut self, snapshot: &StatusSnapshot) {
        for (key, status) in snapshot {
            match self.find_mut(key) {
                Some(controller) => controller.render_status(status),
                None => log::debug!("Ignoring status for unknown device {}", key),
            }
        }
    }
}
