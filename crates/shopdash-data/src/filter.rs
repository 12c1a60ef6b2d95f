//! Delivery-date window filtering.

use crate::records::OrderTable;
use chrono::NaiveDate;
use serde::Serialize;
use shopdash_common::{format_date, Result, ShopDashError};
use std::fmt;
use tracing::debug;

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Create a window; `start` must not be after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ShopDashError::validation_field(
                format!(
                    "window start {} is after window end {}",
                    format_date(start),
                    format_date(end)
                ),
                "start_date",
            ));
        }
        Ok(Self { start, end })
    }

    /// A window covering one day.
    pub const fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Fill unset bounds from the data span.
    ///
    /// Returns `Ok(None)` when a bound is unset and there is no span to take it
    /// from, i.e. no row can ever match.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        span: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Option<Self>> {
        let start = start.or(span.map(|(lo, _)| lo));
        let end = end.or(span.map(|(_, hi)| hi));
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
            _ => Ok(None),
        }
    }

    /// First included day.
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last included day.
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Intersect with the `(min, max)` data span, `None` when disjoint.
    pub fn clamp_to(&self, span: (NaiveDate, NaiveDate)) -> Option<Self> {
        let start = self.start.max(span.0);
        let end = self.end.min(span.1);
        (start <= end).then_some(Self { start, end })
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", format_date(self.start), format_date(self.end))
    }
}

impl OrderTable {
    /// Rows whose customer delivery date falls inside `window`.
    ///
    /// Rows without a delivery date never match. Load warnings are not
    /// carried into the filtered table.
    pub fn filter_by_delivery(&self, window: &DateWindow) -> Self {
        let records: Vec<_> = self
            .records()
            .iter()
            .filter(|r| r.delivered_date().is_some_and(|d| window.contains(d)))
            .cloned()
            .collect();
        debug!(
            window = %window,
            kept = records.len(),
            total = self.len(),
            "Filtered orders by delivery date"
        );
        Self::new(records)
    }
}
