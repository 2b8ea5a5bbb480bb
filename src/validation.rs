//! Input validation for a day's items.
//!
//! The sweep accepts any input and never fails; this module reports what a
//! caller probably did not intend. Detects:
//! - Duplicate IDs
//! - Unscheduled items (skipped by the sweep)
//! - End before start
//! - Negative durations
//! - Items running past midnight (informational: drawn as unfinished)

use crate::models::Item;
use chrono::{NaiveTime, TimeDelta};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending item.
    pub item_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two items share the same ID.
    DuplicateId,
    /// An item has no start time.
    Unscheduled,
    /// An item ends before it starts.
    EndBeforeStart,
    /// An item has a negative duration.
    NegativeDuration,
    /// An item runs into the next day.
    CrossesMidnight,
}

impl ValidationErrorKind {
    /// Whether the layout still renders the item as intended.
    pub fn is_informational(self) -> bool {
        matches!(
            self,
            ValidationErrorKind::Unscheduled | ValidationErrorKind::CrossesMidnight
        )
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, item_id: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            item_id: item_id.to_string(),
            message: message.into(),
        }
    }
}

/// Validates the items of one day.
///
/// Checks:
/// 1. No duplicate item IDs
/// 2. Every item has a start
/// 3. No negative durations
/// 4. No end before start
/// 5. Midnight crossings (an end at exactly `00:00` the next day is not one)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_items(items: &[Item]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for item in items {
        if !ids.insert(item.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                &item.id,
                format!("Duplicate item ID: {}", item.id),
            ));
        }

        if item.duration_min < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                &item.id,
                format!("Item '{}' has duration {} min", item.id, item.duration_min),
            ));
        }

        let Some(start) = item.start else {
            errors.push(ValidationError::new(
                ValidationErrorKind::Unscheduled,
                &item.id,
                format!("Item '{}' has no start time", item.id),
            ));
            continue;
        };
        let Some(end) = item.effective_end() else {
            continue;
        };

        if end < start {
            errors.push(ValidationError::new(
                ValidationErrorKind::EndBeforeStart,
                &item.id,
                format!("Item '{}' ends at {end} before it starts at {start}", item.id),
            ));
            continue;
        }

        let midnight_end = end.time() == NaiveTime::MIN && end - start <= TimeDelta::days(1);
        if end.date() > start.date() && !midnight_end {
            errors.push(ValidationError::new(
                ValidationErrorKind::CrossesMidnight,
                &item.id,
                format!("Item '{}' runs past midnight (ends {end})", item.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
