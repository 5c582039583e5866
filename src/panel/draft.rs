use super::duration_field::DurationField;

const SECONDS_MODULUS: u64 = 59;
const MINUTES_MODULUS: u64 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mins,
    Secs,
    OnMin,
    OnSec,
    OffMin,
    OffSec,
    TotHour,
    TotMin,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Mins,
        Field::Secs,
        Field::OnMin,
        Field::OnSec,
        Field::OffMin,
        Field::OffSec,
        Field::TotHour,
        Field::TotMin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Mins => "single min",
            Field::Secs => "single sec",
            Field::OnMin => "on min",
            Field::OnSec => "on sec",
            Field::OffMin => "off min",
            Field::OffSec => "off sec",
            Field::TotHour => "total hours",
            Field::TotMin => "total min",
        }
    }
}

/// Durations edited locally for one device but not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDraft {
    pub mins: DurationField,
    pub secs: DurationField,
    pub on_min: DurationField,
    pub on_sec: DurationField,
    pub off_min: DurationField,
    pub off_sec: DurationField,
    pub tot_hour: DurationField,
    pub tot_min: DurationField,
}

impl Default for DeviceDraft {
    fn default() -> Self {
        DeviceDraft {
            mins: DurationField::new(0),
            secs: DurationField::wrapping(0, SECONDS_MODULUS),
            on_min: DurationField::new(0),
            on_sec: DurationField::wrapping(0, SECONDS_MODULUS),
            off_min: DurationField::new(0),
            off_sec: DurationField::wrapping(0, SECONDS_MODULUS),
            tot_hour: DurationField::new(0),
            tot_min: DurationField::wrapping(0, MINUTES_MODULUS),
        }
    }
}

impl DeviceDraft {
    pub fn field(&self, field: Field) -> &DurationField {
        match field {
            Field::Mins => &self.mins,
            Field::Secs => &self.secs,
            Field::OnMin => &self.on_min,
            Field::OnSec => &self.on_sec,
            Field::OffMin => &self.off_min,
            Field::OffSec => &self.off_sec,
            Field::TotHour => &self.tot_hour,
            Field::TotMin => &self.tot_min,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut DurationField {
        match field {
            Field::Mins => &mut self.mins,
            Field::Secs => &mut self.secs,
            Field::OnMin => &mut self.on_min,
            Field::OnSec => &mut self.on_sec,
            Field::OffMin => &mut self.off_min,
            Field::OffSec => &mut self.off_sec,
            Field::TotHour => &mut self.tot_hour,
            Field::TotMin => &mut self.tot_min,
        }
    }

    pub fn single_seconds(&self) -> u64 {
        self.mins.value() * 60 + self.secs.value()
    }

    pub fn on_seconds(&self) -> u64 {
        self.on_min.value() * 60 + self.on_sec.value()
    }

    pub fn off_seconds(&self) -> u64 {
        self.off_min.value() * 60 + self.off_sec.value()
    }

    pub fn total_seconds(&self) -> u64 {
        self.tot_hour.value() * 3600 + self.tot_min.value() * 60
    }
}
