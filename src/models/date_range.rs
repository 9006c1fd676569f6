//! Inclusive calendar-day ranges and the query parameters that produce them.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Inclusive `[from, to]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Longest range the dashboard will aggregate over.
    pub const MAX_DAYS: i64 = 366;

    /// Days covered when the caller gives no bounds.
    pub const DEFAULT_DAYS: i64 = 30;

    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, AppError> {
        if from > to {
            return Err(AppError::Validation(format!(
                "from ({from}) must not be after to ({to})"
            )));
        }
        let range = Self { from, to };
        if range.days() > Self::MAX_DAYS {
            return Err(AppError::Validation(format!(
                "date range spans {} days, maximum is {}",
                range.days(),
                Self::MAX_DAYS
            )));
        }
        range.try_previous()?;
        Ok(range)
    }

    /// Number of calendar days in the range, both ends included.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Range of equal length ending the day before `from`.
    ///
    /// Ranges built through [`DateRange::new`] always have one; this only
    /// falls back to `self` for hand-built ranges at the edge of the calendar.
    pub fn previous(&self) -> DateRange {
        self.try_previous().unwrap_or(*self)
    }

    fn try_previous(&self) -> Result<DateRange, AppError> {
        let shift = |days: i64| {
            self.from
                .checked_sub_signed(Duration::days(days))
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "no previous period exists before {}",
                        self.from
                    ))
                })
        };
        Ok(DateRange {
            from: shift(self.days())?,
            to: shift(1)?,
        })
    }

    /// This range extended backwards to also cover [`DateRange::previous`].
    pub fn with_previous(&self) -> DateRange {
        DateRange {
            from: self.previous().from,
            to: self.to,
        }
    }

    /// Every day in the range, in order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.from.iter_days().take(self.days() as usize)
    }
}

/// `?from=&to=&hotel_id=` query parameters shared by range-based endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub hotel_id: Option<String>,
}

impl RangeQuery {
    /// Resolve missing bounds relative to `today`.
    ///
    /// No `to` means today; no `from` means [`DateRange::DEFAULT_DAYS`] days ending at `to`.
    pub fn resolve(&self, today: NaiveDate) -> Result<DateRange, AppError> {
        let to = self.to.unwrap_or(today);
        let from = match self.from {
            Some(from) => from,
            None => to
                .checked_sub_signed(Duration::days(DateRange::DEFAULT_DAYS - 1))
                .ok_or_else(|| AppError::Validation(format!("to ({to}) is out of range")))?,
        };
        DateRange::new(from, to)
    }
}
