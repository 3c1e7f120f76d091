//! Single bounded integer field of the duration picker

use std::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::state::{Observable, Subscription};

/// The three picker fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Inclusive range of values the field accepts
    pub fn range(self) -> RangeInclusive<u32> {
        match self {
            Field::Hours => 0..=99,
            Field::Minutes | Field::Seconds => 0..=59,
        }
    }

    /// Seconds represented by one unit of the field
    pub fn unit_seconds(self) -> u64 {
        match self {
            Field::Hours => 3600,
            Field::Minutes => 60,
            Field::Seconds => 1,
        }
    }
}

/// What an edit did to the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOutcome {
    /// The text was an in-range integer and is now the field value
    Accepted,
    /// The text was not an integer; the field fell back to zero
    Reset,
    /// The text was an integer outside the range; nothing changed
    Rejected,
}

impl EditOutcome {
    /// Whether listeners were notified
    pub fn reported(self) -> bool {
        !matches!(self, EditOutcome::Rejected)
    }
}

/// Bounded integer input that never holds an out-of-range value
#[derive(Debug)]
pub struct IntField {
    range: RangeInclusive<u32>,
    value: Observable<u32>,
    cursor: usize,
}

impl IntField {
    pub fn new(range: RangeInclusive<u32>) -> Self {
        let initial = *range.start();
        Self {
            value: Observable::new(initial),
            cursor: initial.to_string().len(),
            range,
        }
    }

    /// Apply raw text typed into the field.
    ///
    /// `selection` is the cursor position the editor reported for the new
    /// text; it defaults to the end of the text. Text is read as a signed
    /// 32-bit integer, so anything wider counts as malformed.
    pub fn accept(&mut self, raw: &str, selection: Option<usize>) -> EditOutcome {
        let parsed = match raw.parse::<i32>() {
            Ok(parsed) => parsed,
            Err(_) => {
                self.value.set(0);
                self.cursor = 1;
                return EditOutcome::Reset;
            }
        };

        match u32::try_from(parsed) {
            Ok(value) if self.range.contains(&value) => {
                self.value.set(value);
                self.cursor = selection.unwrap_or(raw.len());
                EditOutcome::Accepted
            }
            _ => EditOutcome::Rejected,
        }
    }

    pub fn value(&self) -> u32 {
        self.value.get()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.range.clone()
    }

    /// Value padded to two digits for display
    pub fn display(&self) -> String {
        format!("{:02}", self.value())
    }

    pub fn subscribe(&self) -> Subscription<u32> {
        self.value.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_in_range_value() {
        for field in Field::ALL {
            let mut input = IntField::new(field.range());
            for i in field.range() {
                assert_eq!(input.accept(&i.to_string(), None), EditOutcome::Accepted);
                assert_eq!(input.value(), i);
            }
        }
    }

    #[test]
    fn malformed_text_resets_to_zero() {
        let mut input = IntField::new(Field::Minutes.range());
        for raw in ["", "abc", "1a", " 4", "4.5", "2147483648", "4294967296", "-2147483649"] {
            input.accept("42", None);
            assert_eq!(input.accept(raw, None), EditOutcome::Reset, "raw={raw:?}");
            assert_eq!(input.value(), 0);
            assert_eq!(input.cursor(), 1);
        }
    }

    #[test]
    fn out_of_range_keeps_old_value() {
        let mut input = IntField::new(Field::Seconds.range());
        input.accept("30", Some(2));
        for raw in ["60", "100", "-1", "2147483647", "-2147483648"] {
            assert_eq!(input.accept(raw, Some(0)), EditOutcome::Rejected, "raw={raw:?}");
            assert_eq!(input.value(), 30);
            assert_eq!(input.cursor(), 2);
        }
    }

    #[test]
    fn rejected_edit_does_not_notify() {
        let mut input = IntField::new(Field::Hours.range());
        let sub = input.subscribe();
        input.accept("100", None);
        assert!(!sub.has_changed());

        input.accept("", None);
        assert!(sub.has_changed());
    }

    #[test]
    fn display_pads_single_digits() {
        let mut input = IntField::new(Field::Hours.range());
        assert_eq!(input.display(), "00");
        input.accept("7", None);
        assert_eq!(input.display(), "07");
        input.accept("42", None);
        assert_eq!(input.display(), "42");
    }
}
