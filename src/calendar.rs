//! Month-grid generation and date helpers.
//!
//! Months are addressed zero-based (`0` = January). Grids are always six
//! weeks of seven days, Sunday first.

use chrono::{Datelike, Months, NaiveDate, Utc};

/// Number of week rows in every grid.
pub const GRID_ROWS: usize = 6;
/// Number of day columns in every grid, Sunday through Saturday.
pub const GRID_COLS: usize = 7;

/// Six-by-seven grid of day numbers; `None` marks an empty cell.
pub type MonthGrid = [[Option<u32>; GRID_COLS]; GRID_ROWS];

/// A calendar month as shown by the month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Zero-based month, `0..=11`.
    pub month0: u32,
}

impl YearMonth {
    /// Builds a month, carrying `month0 >= 12` into following years.
    pub fn new(year: i32, month0: u32) -> Self {
        Self {
            year: year + (month0 / 12) as i32,
            month0: month0 % 12,
        }
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// The month before this one.
    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self { year: self.year - 1, month0: 11 }
        } else {
            Self { year: self.year, month0: self.month0 - 1 }
        }
    }

    /// The month after this one.
    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self { year: self.year + 1, month0: 0 }
        } else {
            Self { year: self.year, month0: self.month0 + 1 }
        }
    }

    /// Display grid for this month.
    pub fn grid(self) -> MonthGrid {
        build_month_grid(self.year, self.month0)
    }

    /// The date of `day` in this month, if it exists.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }
}

fn first_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    let ym = YearMonth::new(year, month0);
    NaiveDate::from_ymd_opt(ym.year, ym.month0 + 1, 1)
}

/// Number of days in the month, or `None` outside the representable range.
pub fn days_in_month(year: i32, month0: u32) -> Option<u32> {
    let first = first_of_month(year, month0)?;
    // Day 0 of the following month is the last day of this one.
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some(last.day())
}

/// Builds the six-week display grid for a month.
///
/// Day 1 sits in row 0 at its weekday column; days then fill row-major
/// until the month ends. Every other cell is `None`. A year outside the
/// representable date range yields an all-empty grid.
pub fn build_month_grid(year: i32, month0: u32) -> MonthGrid {
    let mut grid: MonthGrid = [[None; GRID_COLS]; GRID_ROWS];
    let (Some(first), Some(days)) = (first_of_month(year, month0), days_in_month(year, month0)) else {
        return grid;
    };

    let offset = first.weekday().num_days_from_sunday() as usize;
    for day in 1..=days {
        let cell = offset + day as usize - 1;
        if cell >= GRID_ROWS * GRID_COLS {
            break;
        }
        grid[cell / GRID_COLS][cell % GRID_COLS] = Some(day);
    }
    grid
}

/// Formats a zero-based month date as `YYYY-MM-DD`.
pub fn format_date(year: i32, month0: u32, day: u32) -> String {
    format!("{year:04}-{:02}-{day:02}", month0 + 1)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Renders `YYYY-MM-DD` as `YYYY/M/D`; malformed input renders as empty.
pub fn format_display_date(iso: &str) -> String {
    match parse_date(iso) {
        Some(d) => format!("{}/{}/{}", d.year(), d.month(), d.day()),
        None => String::new(),
    }
}

/// Today's calendar date in UTC, the same day entry ids and `created_at` use.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// True when `date` (`YYYY-MM-DD`) is the current UTC date.
pub fn is_today(date: &str) -> bool {
    is_today_at(date, today())
}

/// True when `date` (`YYYY-MM-DD`) names `today`.
pub fn is_today_at(date: &str, today: NaiveDate) -> bool {
    parse_date(date) == Some(today)
}
