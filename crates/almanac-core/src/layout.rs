//! Event placement inside hour cells and day cells.

use chrono::{
  NaiveDate,
  NaiveDateTime,
  Timelike
};
use serde::{
  Deserialize,
  Serialize
};

use crate::event::CalendarEvent;

/// Inclusive hour-of-day window of rows drawn by the time-grid views.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct VisibleHours {
  pub start: u32,
  pub end:   u32
}

impl VisibleHours {
  pub const NARROW: Self = Self {
    start: 5,
    end:   22
  };
  pub const WIDE: Self = Self {
    start: 0,
    end:   23
  };

  pub fn new(
    start: u32,
    end: u32
  ) -> Self {
    let start = start.min(23);
    Self {
      start,
      end: end.clamp(start, 23)
    }
  }

  /// Number of hour rows drawn.
  pub fn row_count(self) -> u32 {
    self.end.saturating_sub(self.start) + 1
  }

  pub fn contains(
    self,
    hour: u32
  ) -> bool {
    (self.start..=self.end).contains(&hour)
  }
}

impl Default for VisibleHours {
  fn default() -> Self {
    Self::WIDE
  }
}

/// Vertical placement of an event inside its start-hour cell, in percent of
/// one hour row. Heights above 100 overflow into the following rows.
#[derive(
  Debug, Clone, Copy, PartialEq,
)]
pub struct CellOffset {
  pub top_percent:    f64,
  pub height_percent: f64
}

/// Events that start in the same calendar hour as `hour`.
pub fn events_in_hour(
  events: &[CalendarEvent],
  hour: NaiveDateTime
) -> Vec<&CalendarEvent> {
  events
    .iter()
    .filter(|event| {
      event.starts_in_hour(hour)
    })
    .collect()
}

pub fn cell_offset(
  event: &CalendarEvent
) -> CellOffset {
  let minutes =
    f64::from(event.start.minute());
  let duration =
    event.duration_minutes() as f64;
  CellOffset {
    top_percent:    minutes / 60.0
      * 100.0,
    height_percent: duration / 60.0
      * 100.0
  }
}

/// Events whose start falls on `day`, in list order.
pub fn events_on_day(
  events: &[CalendarEvent],
  day: NaiveDate
) -> Vec<&CalendarEvent> {
  events
    .iter()
    .filter(|event| {
      event.start_day() == day
    })
    .collect()
}

/// Position of the current-time line in percent of the visible grid
/// height, or `None` when `now` is outside the visible hours.
pub fn now_line_position(
  hours: VisibleHours,
  now: NaiveDateTime
) -> Option<f64> {
  let hour = now.hour();
  if !hours.contains(hour) {
    return None;
  }

  let elapsed = f64::from(
    hour - hours.start
  ) + f64::from(now.minute()) / 60.0;
  Some(
    elapsed
      / f64::from(hours.row_count())
      * 100.0
  )
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(
    day: u32,
    hour: u32,
    minute: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
      .expect("valid date")
      .and_hms_opt(hour, minute, 0)
      .expect("valid time")
  }

  fn event(
    id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime
  ) -> CalendarEvent {
    CalendarEvent::new(id, id, start, end)
  }

  #[test]
  fn offset_within_one_hour() {
    let offset = cell_offset(&event(
      "a",
      at(5, 10, 15),
      at(5, 10, 45)
    ));
    assert_eq!(offset.top_percent, 25.0);
    assert_eq!(offset.height_percent, 50.0);
    assert!(
      offset.top_percent
        + offset.height_percent
        <= 100.0
    );
  }

  #[test]
  fn long_events_overflow_their_cell() {
    let offset = cell_offset(&event(
      "a",
      at(5, 9, 30),
      at(5, 12, 0)
    ));
    assert_eq!(offset.top_percent, 50.0);
    assert_eq!(offset.height_percent, 250.0);
  }

  #[test]
  fn inverted_events_produce_negative_height() {
    let offset = cell_offset(&event(
      "a",
      at(5, 10, 0),
      at(5, 9, 30)
    ));
    assert_eq!(offset.height_percent, -50.0);
  }

  #[test]
  fn multi_hour_event_is_attributed_to_start_hour_only()
  {
    let events = vec![
      event("a", at(5, 9, 30), at(5, 12, 0)),
      event("b", at(5, 10, 0), at(5, 10, 30)),
      event("c", at(6, 9, 0), at(6, 10, 0)),
    ];

    let nine = events_in_hour(&events, at(5, 9, 0));
    assert_eq!(nine.len(), 1);
    assert_eq!(nine[0].id, "a");

    let ten =
      events_in_hour(&events, at(5, 10, 0));
    assert_eq!(
      ten
        .iter()
        .map(|event| event.id.as_str())
        .collect::<Vec<_>>(),
      vec!["b"]
    );
    assert!(
      events_in_hour(&events, at(5, 11, 0))
        .is_empty()
    );
  }

  #[test]
  fn events_on_day_ignores_time_and_keeps_order() {
    let events = vec![
      event("late", at(5, 22, 0), at(5, 23, 0)),
      event("next", at(6, 0, 0), at(6, 1, 0)),
      event("early", at(5, 7, 0), at(5, 8, 0)),
    ];
    let day = NaiveDate::from_ymd_opt(2024, 3, 5)
      .expect("valid date");
    assert_eq!(
      events_on_day(&events, day)
        .iter()
        .map(|event| event.id.as_str())
        .collect::<Vec<_>>(),
      vec!["late", "early"]
    );
  }

  #[test]
  fn now_line_hidden_outside_visible_hours() {
    assert_eq!(
      now_line_position(
        VisibleHours::NARROW,
        at(5, 3, 0)
      ),
      None
    );
    assert_eq!(
      now_line_position(
        VisibleHours::NARROW,
        at(5, 23, 10)
      ),
      None
    );
  }

  #[test]
  fn now_line_inside_visible_hours() {
    let position = now_line_position(
      VisibleHours::NARROW,
      at(5, 14, 30)
    )
    .expect("visible");
    assert!(position > 0.0 && position < 100.0);
    assert!((position - 9.5 / 18.0 * 100.0).abs() < 1e-9);

    assert_eq!(
      now_line_position(
        VisibleHours::WIDE,
        at(5, 0, 0)
      ),
      Some(0.0)
    );
    let last = now_line_position(
      VisibleHours::WIDE,
      at(5, 23, 59)
    )
    .expect("visible");
    assert!(last < 100.0);
  }

  #[test]
  fn visible_hours_clamp_inverted_ranges() {
    let hours = VisibleHours::new(20, 4);
    assert_eq!(hours.start, 20);
    assert_eq!(hours.end, 20);
    assert_eq!(hours.row_count(), 1);
    assert_eq!(VisibleHours::new(30, 40).start, 23);
  }
}
