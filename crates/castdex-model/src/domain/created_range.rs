use time::{Date, OffsetDateTime};

use crate::Character;

/// Client-side filter on the `created` timestamp of catalog items.
///
/// The remote endpoint cannot express a creation-date predicate, so this
/// narrowing happens in memory after each fetch. Bounds are calendar days:
/// `start` covers from 00:00:00.000 and `end` through 23:59:59.999 of the
/// respective day, both UTC, matching the reference of item timestamps.
/// Deterministic and side-effect free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreatedRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl CreatedRange {
    pub fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// Returns `true` when both bounds are absent and filtering is the
    /// identity.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `at` falls within the present bounds, inclusive.
    pub fn contains(&self, at: OffsetDateTime) -> bool {
        if let Some(start) = self.start
            && at < start.midnight().assume_utc()
        {
            return false;
        }
        if let Some(end) = self.end {
            let end_of_day = end
                .with_hms_milli(23, 59, 59, 999)
                .expect("constant time components are in range")
                .assume_utc();
            if at > end_of_day {
                return false;
            }
        }
        true
    }

    /// Narrow `items` to those created within the range.
    ///
    /// Arrival order is preserved; with both bounds absent the input is
    /// returned unchanged.
    pub fn filter(&self, items: Vec<Character>) -> Vec<Character> {
        if self.is_unbounded() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| self.contains(item.created))
            .collect()
    }
}
