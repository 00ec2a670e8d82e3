use chrono::DateTime;
use chrono_tz::Tz;
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Column holding the packed 30-second sleep state series.
pub const SLEEP_GRAPH_FIELD: &str = "Detailed Sleep Graph";

/// Seconds between two consecutive samples of the sleep graph.
pub const SAMPLE_INTERVAL_SECS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepState {
    Undefined,
    Wake,
    Rem,
    Light,
    Deep,
}

impl SleepState {
    /// Look up the state for a single code of the packed graph.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "0" => Ok(SleepState::Undefined),
            "1" => Ok(SleepState::Wake),
            "2" => Ok(SleepState::Rem),
            "3" => Ok(SleepState::Light),
            "4" => Ok(SleepState::Deep),
            other => Err(Error::UnknownState(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SleepState::Undefined => "undefined",
            SleepState::Wake => "wake",
            SleepState::Rem => "REM",
            SleepState::Light => "Light",
            SleepState::Deep => "Deep",
        }
    }
}

/// The date/time columns of an export, all in `M/D/Y H:MM` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    StartOfNight,
    EndOfNight,
    RiseTime,
    FirstAlarmRing,
    LastAlarmRing,
    FirstSnoozeTime,
    LastSnoozeTime,
    SetAlarmTime,
}

impl DateField {
    pub const ALL: [DateField; 8] = [
        DateField::StartOfNight,
        DateField::EndOfNight,
        DateField::RiseTime,
        DateField::FirstAlarmRing,
        DateField::LastAlarmRing,
        DateField::FirstSnoozeTime,
        DateField::LastSnoozeTime,
        DateField::SetAlarmTime,
    ];

    /// Column name as it appears in the export header.
    pub fn name(self) -> &'static str {
        match self {
            DateField::StartOfNight => "Start of Night",
            DateField::EndOfNight => "End of Night",
            DateField::RiseTime => "Rise Time",
            DateField::FirstAlarmRing => "First Alarm Ring",
            DateField::LastAlarmRing => "Last Alarm Ring",
            DateField::FirstSnoozeTime => "First Snooze Time",
            DateField::LastSnoozeTime => "Last Snooze Time",
            DateField::SetAlarmTime => "Set Alarm Time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        DateField::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// One row of a sleep export.
///
/// Known columns get typed slots; anything else is kept verbatim in
/// header order so it can be passed through to the summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SleepRecord {
    pub sleep_graph: Option<String>,
    pub dates: BTreeMap<DateField, String>,
    pub extra: Vec<(String, String)>,
}

impl SleepRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from header/value pairs. A repeated column keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.set(name.as_ref(), value);
        }
        record
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == SLEEP_GRAPH_FIELD {
            self.sleep_graph = Some(value);
        } else if let Some(field) = DateField::from_name(name) {
            self.dates.insert(field, value);
        } else if let Some(slot) = self.extra.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value;
        } else {
            self.extra.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        if name == SLEEP_GRAPH_FIELD {
            return self.sleep_graph.as_deref();
        }
        if let Some(field) = DateField::from_name(name) {
            return self.date(field);
        }
        self.extra
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn date(&self, field: DateField) -> Option<&str> {
        self.dates.get(&field).map(String::as_str)
    }

    /// Every column present in the record, as `(name, value)`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        let graph = self
            .sleep_graph
            .as_deref()
            .map(|value| (SLEEP_GRAPH_FIELD, value));
        let dates = self
            .dates
            .iter()
            .map(|(field, value)| (field.name(), value.as_str()));
        let extra = self
            .extra
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()));
        graph.into_iter().chain(dates).chain(extra)
    }

    pub fn len(&self) -> usize {
        usize::from(self.sleep_graph.is_some()) + self.dates.len() + self.extra.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One expanded point of the sleep graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesSample {
    pub timestamp: DateTime<Tz>,
    pub state: SleepState,
}
