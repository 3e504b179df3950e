//! Recurrence rule and next-occurrence computation.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

/// How a reminder repeats after delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recurrence_rule", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    /// One-shot reminder.
    None,
    /// Repeats every day.
    Daily,
    /// Repeats every 7 days.
    Weekly,
    /// Repeats every calendar month (day-of-month clamped to the
    /// target month's length, so Jan 31 chains to Feb 28/29).
    Monthly,
}

impl Default for Recurrence {
    fn default() -> Self {
        Self::None
    }
}

/// Compute the next occurrence of a recurring reminder.
///
/// Pure and deterministic: invoked both at creation time (immediate
/// delivery of a recurring reminder) and during the sweep, and its output
/// becomes the next row's `scheduled_at` verbatim. Returns `None` when the
/// chain terminates: non-recurring rule, or the computed time exceeds the
/// end boundary.
pub fn next_occurrence(
    from: DateTime<Utc>,
    recurrence: Recurrence,
    end_at: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let next = match recurrence {
        Recurrence::None => return None,
        Recurrence::Daily => from + Duration::days(1),
        Recurrence::Weekly => from + Duration::days(7),
        Recurrence::Monthly => from.checked_add_months(Months::new(1))?,
    };

    match end_at {
        Some(end) if next > end => None,
        _ => Some(next),
    }
}
