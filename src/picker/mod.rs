//! Duration picker module
//!
//! Three bounded fields (hours, minutes, seconds) combined into the candidate
//! duration handed to the countdown engine on start.

pub mod field;

use std::time::Duration;
use tracing::debug;

use crate::state::{Observable, Subscription};
pub use field::{EditOutcome, Field, IntField};

/// Hours/minutes/seconds input with keystroke validation
#[derive(Debug)]
pub struct DurationInput {
    hours: IntField,
    minutes: IntField,
    seconds: IntField,
    candidate: Observable<Duration>,
}

impl DurationInput {
    /// Create a picker with every field at zero
    pub fn new() -> Self {
        Self {
            hours: IntField::new(Field::Hours.range()),
            minutes: IntField::new(Field::Minutes.range()),
            seconds: IntField::new(Field::Seconds.range()),
            candidate: Observable::new(Duration::ZERO),
        }
    }

    /// Apply raw text to one field and refresh the candidate duration
    pub fn edit(&mut self, field: Field, raw: &str, selection: Option<usize>) -> EditOutcome {
        let outcome = self.field_mut(field).accept(raw, selection);
        debug!(?field, raw, ?outcome, "Picker edit");

        if outcome.reported() {
            self.candidate.set(self.compute_candidate());
        }
        outcome
    }

    pub fn field(&self, field: Field) -> &IntField {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut IntField {
        match field {
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }

    pub fn value(&self, field: Field) -> u32 {
        self.field(field).value()
    }

    /// Duration the fields currently add up to
    pub fn candidate(&self) -> Duration {
        self.candidate.get()
    }

    pub fn subscribe(&self, field: Field) -> Subscription<u32> {
        self.field(field).subscribe()
    }

    pub fn subscribe_candidate(&self) -> Subscription<Duration> {
        self.candidate.subscribe()
    }

    fn compute_candidate(&self) -> Duration {
        let seconds = Field::ALL
            .iter()
            .map(|&field| u64::from(self.value(field)) * field.unit_seconds())
            .sum();
        Duration::from_secs(seconds)
    }
}

impl Default for DurationInput {
    fn default() -> Self {
        Self::new()
    }
}
