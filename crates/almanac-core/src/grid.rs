//! Day, week and month boundaries for Sunday-start grids.

use chrono::{
  Datelike,
  Duration,
  Months,
  NaiveDate,
  NaiveDateTime
};

use crate::view::CalendarView;

pub const MONTH_GRID_DAYS: usize = 42;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum NavDirection {
  Prev,
  Next
}

impl NavDirection {
  fn sign(self) -> i64 {
    match self {
      | Self::Prev => -1,
      | Self::Next => 1
    }
  }
}

/// 42 consecutive days starting at the Sunday on or before the first of
/// `date`'s month.
pub fn month_grid(
  date: NaiveDate
) -> [NaiveDate; MONTH_GRID_DAYS] {
  let start = start_of_week(
    first_day_of_month(
      date.year(),
      date.month()
    )
  );
  std::array::from_fn(|offset| {
    shift_days(start, offset as i64)
  })
}

/// The Sunday-start week containing `date`.
pub fn week_dates(
  date: NaiveDate
) -> [NaiveDate; 7] {
  let start = start_of_week(date);
  std::array::from_fn(|offset| {
    shift_days(start, offset as i64)
  })
}

/// Hourly instants on `date` for every hour in `start..=end`.
pub fn hours_of_day(
  date: NaiveDate,
  start: u32,
  end: u32
) -> Vec<NaiveDateTime> {
  (start..=end.min(23))
    .filter_map(|hour| {
      date.and_hms_opt(hour, 0, 0)
    })
    .collect()
}

/// Next navigation cursor for `view`. Month and year steps follow chrono's
/// calendar arithmetic, which clamps to the last day of a shorter month.
pub fn shift_focus(
  date: NaiveDateTime,
  view: CalendarView,
  direction: NavDirection
) -> NaiveDateTime {
  let step = direction.sign();
  match view {
    | CalendarView::Day => {
      shift_datetime_days(date, step)
    }
    | CalendarView::Week => {
      shift_datetime_days(date, step * 7)
    }
    | CalendarView::Month => {
      shift_months(date, step as i32)
    }
    | CalendarView::Year => {
      shift_years(date, step as i32)
    }
  }
}

pub fn shift_days(
  date: NaiveDate,
  days: i64
) -> NaiveDate {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

fn shift_datetime_days(
  date: NaiveDateTime,
  days: i64
) -> NaiveDateTime {
  date
    .checked_add_signed(Duration::days(
      days
    ))
    .unwrap_or(date)
}

pub fn shift_months(
  date: NaiveDateTime,
  months: i32
) -> NaiveDateTime {
  let magnitude =
    Months::new(months.unsigned_abs());
  let shifted = if months >= 0 {
    date.checked_add_months(magnitude)
  } else {
    date.checked_sub_months(magnitude)
  };
  shifted.unwrap_or(date)
}

pub fn shift_years(
  date: NaiveDateTime,
  years: i32
) -> NaiveDateTime {
  years
    .checked_mul(12)
    .map_or(date, |months| {
      shift_months(date, months)
    })
}

pub fn start_of_week(
  day: NaiveDate
) -> NaiveDate {
  let diff = day
    .weekday()
    .num_days_from_sunday()
    as i64;
  shift_days(day, -diff)
}

pub fn first_day_of_month(
  year: i32,
  month: u32
) -> NaiveDate {
  NaiveDate::from_ymd_opt(
    year, month, 1
  )
  .unwrap_or(NaiveDate::MIN)
}
