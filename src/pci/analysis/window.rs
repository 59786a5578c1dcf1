use std::fmt;

use chrono::{Days, NaiveDate};

use crate::pci::analysis::config::WindowSettings;
use crate::pci::analysis::error::{ReportError, Result};

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReportError::InvalidParameter(format!(
                "window start {start} is after its end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// How far back a report looks: a number of days before the reference day,
/// or an explicit first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    Days(u32),
    Since(NaiveDate),
}

impl Lookback {
    /// Resolves the lookback into its first day relative to `today`.
    pub fn resolve(self, today: NaiveDate, settings: &WindowSettings) -> Result<NaiveDate> {
        match self {
            Lookback::Days(days) => {
                if !(settings.min_lookback_days..=settings.max_lookback_days).contains(&days) {
                    return Err(ReportError::InvalidParameter(format!(
                        "lookback of {days} days is outside {}..={}",
                        settings.min_lookback_days, settings.max_lookback_days
                    )));
                }
                today
                    .checked_sub_days(Days::new(u64::from(days)))
                    .ok_or_else(|| {
                        ReportError::InvalidParameter(format!(
                            "lookback of {days} days from {today} is before the earliest supported date"
                        ))
                    })
            }
            Lookback::Since(date) => Ok(date),
        }
    }
}

/// First and last date actually present in a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl AvailableRange {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        dates.into_iter().fold(None, |range, date| {
            Some(match range {
                None => AvailableRange {
                    first: date,
                    last: date,
                },
                Some(AvailableRange { first, last }) => AvailableRange {
                    first: first.min(date),
                    last: last.max(date),
                },
            })
        })
    }

    pub fn covers(&self, window: &DateWindow) -> bool {
        self.first <= window.start() && window.end() <= self.last
    }
}

impl fmt::Display for AvailableRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.first, self.last)
    }
}

/// Non-fatal conditions that leave a report empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportWarning {
    /// The selection reaches outside the data; nothing was computed.
    OutsideAvailableRange {
        requested: DateWindow,
        available: AvailableRange,
    },
    /// The uploaded files contain no usable rows at all.
    NoData,
    /// The selection is valid but matches no rows.
    EmptyResult,
}

impl fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportWarning::OutsideAvailableRange {
                requested,
                available,
            } => write!(
                f,
                "selected range {requested} is outside available data. Data starts from {} and ends on {}",
                available.first, available.last
            ),
            ReportWarning::NoData => write!(f, "the input files contain no usable rows"),
            ReportWarning::EmptyResult => write!(f, "no rows match the selected range"),
        }
    }
}

/// Rows of one report plus what the caller needs to present them.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<T> {
    pub rows: Vec<T>,
    pub available: Option<AvailableRange>,
    pub warning: Option<ReportWarning>,
}

impl<T> Report<T> {
    /// A report that was not computed because of `warning`.
    pub fn withheld(available: Option<AvailableRange>, warning: ReportWarning) -> Self {
        Self {
            rows: Vec::new(),
            available,
            warning: Some(warning),
        }
    }

    /// A computed report; an empty row set carries [`ReportWarning::EmptyResult`].
    pub fn computed(rows: Vec<T>, available: Option<AvailableRange>) -> Self {
        let warning = rows.is_empty().then_some(ReportWarning::EmptyResult);
        Self {
            rows,
            available,
            warning,
        }
    }
}
