use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weekday labels, Sunday first.
pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// One cell of the month calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub present: bool,
}

/// Presence calendar for one month. `month` is zero-based (January = 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub month: u32,
    pub year: i32,
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekDay {
    pub label: &'static str,
    pub date: NaiveDate,
    pub present: bool,
}

/// Seven days starting on a Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    pub start: NaiveDate,
    pub days: Vec<WeekDay>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekType {
    #[default]
    #[serde(rename = "thisWeek")]
    ThisWeek,
    #[serde(rename = "lastWeek")]
    LastWeek,
}

impl WeekType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeekType::ThisWeek => "thisWeek",
            WeekType::LastWeek => "lastWeek",
        }
    }
}

impl fmt::Display for WeekType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thisWeek" => Ok(WeekType::ThisWeek),
            "lastWeek" => Ok(WeekType::LastWeek),
            other => Err(format!("Unknown week type: {other}")),
        }
    }
}

/// Month grid together with the counters shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub grid: MonthGrid,
    pub month_present: usize,
    pub year_present: usize,
}

/// Parse one attendance entry into a calendar day in the reference offset.
///
/// Accepts plain `YYYY-MM-DD` dates, RFC 3339 timestamps, and naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps (read as UTC). Anything else is
/// rejected with `None`.
pub fn parse_record(raw: &str, offset: FixedOffset) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&offset).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc().with_timezone(&offset).date_naive())
}

/// Today's calendar date in the reference offset.
pub fn today_in(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// Number of days in a zero-based month, or `None` when the month is out of range.
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    if month > 11 {
        return None;
    }
    let (next_year, next_month) = if month == 11 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 2)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Mark every day of `month`/`year` that has at least one record.
///
/// Records from other months are ignored. An out-of-range month yields an
/// empty grid.
pub fn build_month_grid(records: &[NaiveDate], month: u32, year: i32) -> MonthGrid {
    let len = days_in_month(month, year).unwrap_or(0);
    let mut days: Vec<DayCell> = (1..=len).map(|day| DayCell { day, present: false }).collect();

    for date in records {
        if date.year() == year && date.month0() == month {
            if let Some(cell) = days.get_mut(date.day0() as usize) {
                cell.present = true;
            }
        }
    }

    MonthGrid { month, year, days }
}

pub fn month_present_count(grid: &MonthGrid) -> usize {
    grid.days.iter().filter(|d| d.present).count()
}

/// Records falling in `year`, any month. Duplicate records count separately.
pub fn year_present_count(records: &[NaiveDate], year: i32) -> usize {
    records.iter().filter(|d| d.year() == year).count()
}

/// Sunday that opens the requested week relative to `today`.
pub fn week_start(today: NaiveDate, week: WeekType) -> NaiveDate {
    let mut back = u64::from(today.weekday().num_days_from_sunday());
    if week == WeekType::LastWeek {
        back += 7;
    }
    today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

/// Presence for the seven days of this or last week.
pub fn build_week_grid(records: &[NaiveDate], week: WeekType, today: NaiveDate) -> WeekGrid {
    let start = week_start(today, week);
    let marked: HashSet<NaiveDate> = records.iter().copied().collect();

    let days = DAY_LABELS
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let date = start.checked_add_days(Days::new(i as u64)).unwrap_or(NaiveDate::MAX);
            WeekDay { label, date, present: marked.contains(&date) }
        })
        .collect();

    WeekGrid { start, days }
}

/// Attendance history of one member with malformed entries already dropped.
#[derive(Debug, Clone, Default)]
pub struct AttendanceLog {
    dates: Vec<NaiveDate>,
    rejected: usize,
}

impl AttendanceLog {
    pub fn parse<I, S>(raw: I, offset: FixedOffset) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dates = Vec::new();
        let mut rejected = 0;
        for entry in raw {
            match parse_record(entry.as_ref(), offset) {
                Some(date) => dates.push(date),
                None => {
                    log::debug!("Skipping malformed attendance date {:?}", entry.as_ref());
                    rejected += 1;
                }
            }
        }
        Self { dates, rejected }
    }

    pub fn from_dates(dates: Vec<NaiveDate>) -> Self {
        Self { dates, rejected: 0 }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Entries that could not be read as a date.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn month_summary(&self, month: u32, year: i32) -> MonthSummary {
        let grid = build_month_grid(&self.dates, month, year);
        let month_present = month_present_count(&grid);
        let year_present = year_present_count(&self.dates, year);
        MonthSummary { grid, month_present, year_present }
    }

    pub fn week_grid(&self, week: WeekType, today: NaiveDate) -> WeekGrid {
        build_week_grid(&self.dates, week, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn parses_plain_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(parse_record("2025-03-09", utc()), Some(expected));
        assert_eq!(parse_record("2025-03-09T10:15:00Z", utc()), Some(expected));
        assert_eq!(parse_record("2025-03-09T10:15:00.123", utc()), Some(expected));
        assert_eq!(parse_record(" 2025-03-09 ", utc()), Some(expected));
    }

    #[test]
    fn timestamps_shift_into_reference_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(
            parse_record("2025-03-09T20:00:00Z", ist),
            NaiveDate::from_ymd_opt(2025, 3, 10)
        );
        // Plain dates carry no time and are never shifted.
        assert_eq!(parse_record("2025-03-09", ist), NaiveDate::from_ymd_opt(2025, 3, 9));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_record("", utc()), None);
        assert_eq!(parse_record("not a date", utc()), None);
        assert_eq!(parse_record("2025-02-30", utc()), None);
        assert_eq!(parse_record("2025-13-01", utc()), None);
    }

    #[test]
    fn december_rolls_into_next_year() {
        assert_eq!(days_in_month(11, 2024), Some(31));
        assert_eq!(days_in_month(12, 2024), None);
    }
}
