use crate::errors::MoodError;
use crate::models::MoodRecord;
use crate::store::MoodStore;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

pub const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A calendar month, always valid (`month` is 1..=12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    /// Parses `YYYY-MM`.
    pub fn parse(value: &str) -> Result<Self, MoodError> {
        let invalid = || MoodError::InvalidMonth {
            value: value.to_string(),
        };
        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse().map_err(|_| invalid())?;
        let month = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// Every date of the month, in order.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last_day();
        self.first_day().iter_days().take_while(move |day| *day <= last)
    }

    pub fn day_count(self) -> u32 {
        self.last_day().day()
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Human label such as `January 2024`.
    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub in_month: bool,
    pub entry: Option<MoodRecord>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    Blank,
    Day(DayCell),
}

impl CalendarCell {
    pub fn as_day(&self) -> Option<&DayCell> {
        match self {
            CalendarCell::Day(cell) => Some(cell),
            CalendarCell::Blank => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarGrid {
    pub month: YearMonth,
    pub label: String,
    pub weekdays: [&'static str; 7],
    pub leading_blanks: usize,
    pub cells: Vec<CalendarCell>,
}

pub fn build_grid(store: &MoodStore, month: YearMonth) -> CalendarGrid {
    build_grid_at(Local::now().date_naive(), store, month)
}

/// Lays `month` out on a Sunday-first 7-column grid. Leading placeholders
/// cover the weekdays before day 1; there is no trailing padding.
pub fn build_grid_at(today: NaiveDate, store: &MoodStore, month: YearMonth) -> CalendarGrid {
    let leading_blanks = month.first_day().weekday().num_days_from_sunday() as usize;
    let mut cells = Vec::with_capacity(leading_blanks + month.day_count() as usize);
    cells.extend(std::iter::repeat_n(CalendarCell::Blank, leading_blanks));

    for date in month.days() {
        cells.push(CalendarCell::Day(DayCell {
            date,
            day: date.day(),
            is_today: date == today,
            in_month: YearMonth::containing(date) == month,
            entry: store.get(date.into()).cloned(),
        }));
    }

    CalendarGrid {
        month,
        label: month.label(),
        weekdays: WEEKDAY_HEADER,
        leading_blanks,
        cells,
    }
}
