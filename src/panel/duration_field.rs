/// A non-negative counter edited one step at a time.
///
/// Without a modulus the value saturates at zero. With a modulus `m` the value
/// stays within `[0, m]` and steps past either end wrap around, so seconds go
/// 59 -> 0 and 0 -> 59.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationField {
    value: u64,
    modulus: Option<u64>,
}

impl DurationField {
    pub fn new(value: u64) -> Self {
        DurationField {
            value,
            modulus: None,
        }
    }

    pub fn wrapping(value: u64, modulus: u64) -> Self {
        DurationField {
            value: value % (modulus + 1),
            modulus: Some(modulus),
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn adjust(&mut self, delta: i64) {
        let sum = self.value as i128 + delta as i128;

        self.value = match self.modulus {
            Some(modulus) => sum.rem_euclid(modulus as i128 + 1) as u64,
            None => sum.clamp(0, u64::MAX as i128) as u64,
        };
    }

    pub fn display(&self) -> String {
        format!("{:02}", self.value)
    }
}
