//! Per-view layout models.
//!
//! Each model is a pure function of the calendar state, the current time and
//! the visible hour range. Markup renderers (web, terminal) draw these models
//! and never re-derive placement themselves.

use chrono::{
  Datelike,
  NaiveDate,
  NaiveDateTime
};

use crate::event::CalendarEvent;
use crate::grid::{
  hours_of_day,
  month_grid,
  week_dates
};
use crate::layout::{
  CellOffset,
  VisibleHours,
  cell_offset,
  events_in_hour,
  events_on_day,
  now_line_position
};
use crate::locale::{
  CalendarLocale,
  weekday_labels
};
use crate::state::CalendarState;
use crate::view::CalendarView;

/// Inputs shared by every view builder.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
  pub view:             CalendarView,
  pub date:             NaiveDateTime,
  pub now:              NaiveDateTime,
  pub events:           &'a [CalendarEvent],
  pub locale:           CalendarLocale,
  pub hours:            VisibleHours
}

impl<'a> ViewContext<'a> {
  pub fn from_state(
    state: &'a CalendarState,
    now: NaiveDateTime,
    hours: VisibleHours
  ) -> Self {
    Self {
      view: state.view(),
      date: state.date(),
      now,
      events: state.events(),
      locale: state.locale(),
      hours
    }
  }

  fn today(&self) -> NaiveDate {
    self.now.date()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEvent {
  pub event:  CalendarEvent,
  pub offset: CellOffset
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow {
  pub slot:   NaiveDateTime,
  pub events: Vec<PlacedEvent>
}

impl HourRow {
  pub fn label(&self) -> String {
    self.slot.format("%H:%M").to_string()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayLayout {
  pub date:        NaiveDate,
  pub is_today:    bool,
  pub rows:        Vec<HourRow>,
  /// Percent of the grid height; present only for today within range.
  pub now_line:    Option<f64>,
  /// All events starting on the day, including ones outside the rows.
  pub event_count: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekColumn {
  pub date:          NaiveDate,
  pub weekday_label: &'static str,
  pub is_today:      bool,
  pub rows:          Vec<HourRow>,
  pub event_count:   usize,
  /// Instant reported when empty space in the column is clicked.
  pub click_slot:    NaiveDateTime
}

#[derive(
  Debug, Clone, Copy, PartialEq,
)]
pub struct NowLine {
  pub column:  usize,
  pub percent: f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
  pub hour_labels: Vec<String>,
  pub columns:     Vec<WeekColumn>,
  pub now_line:    Option<NowLine>
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
  pub date:     NaiveDate,
  pub in_month: bool,
  pub is_today: bool,
  /// Every event starting on `date`, in caller order.
  pub events:   Vec<CalendarEvent>
}

impl MonthCell {
  /// Instant reported when empty space in the cell is clicked.
  pub fn click_slot(
    &self
  ) -> NaiveDateTime {
    self.date.and_time(chrono::NaiveTime::MIN)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
  pub year:           i32,
  pub month:          u32,
  pub weekday_labels: [&'static str; 7],
  pub cells:          Vec<MonthCell>
}

/// Layout for the active view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewLayout {
  Day(DayLayout),
  Week(WeekLayout),
  Month(MonthLayout),
  /// A valid view value without a renderer.
  Reserved(CalendarView)
}

/// The single dispatch point from view to layout builder.
pub fn build_view_layout(
  ctx: &ViewContext<'_>
) -> ViewLayout {
  match ctx.view {
    | CalendarView::Day => {
      ViewLayout::Day(day_layout(ctx))
    }
    | CalendarView::Week => {
      ViewLayout::Week(week_layout(ctx))
    }
    | CalendarView::Month => {
      ViewLayout::Month(month_layout(ctx))
    }
    | CalendarView::Year => {
      ViewLayout::Reserved(ctx.view)
    }
  }
}

fn hour_rows(
  events: &[CalendarEvent],
  day: NaiveDate,
  hours: VisibleHours
) -> Vec<HourRow> {
  hours_of_day(day, hours.start, hours.end)
    .into_iter()
    .map(|slot| {
      HourRow {
        slot,
        events: events_in_hour(events, slot)
          .into_iter()
          .map(|event| {
            PlacedEvent {
              offset: cell_offset(event),
              event:  event.clone()
            }
          })
          .collect()
      }
    })
    .collect()
}

pub fn day_layout(
  ctx: &ViewContext<'_>
) -> DayLayout {
  let date = ctx.date.date();
  let is_today = date == ctx.today();
  DayLayout {
    date,
    is_today,
    rows: hour_rows(
      ctx.events, date, ctx.hours
    ),
    now_line: is_today
      .then(|| {
        now_line_position(ctx.hours, ctx.now)
      })
      .flatten(),
    event_count: events_on_day(
      ctx.events, date
    )
    .len()
  }
}

pub fn week_layout(
  ctx: &ViewContext<'_>
) -> WeekLayout {
  let today = ctx.today();
  let days = week_dates(ctx.date.date());

  let columns = days
    .iter()
    .map(|&date| {
      WeekColumn {
        date,
        weekday_label: ctx
          .locale
          .weekday_short(date),
        is_today: date == today,
        rows: hour_rows(
          ctx.events, date, ctx.hours
        ),
        event_count: events_on_day(
          ctx.events, date
        )
        .len(),
        click_slot: date
          .and_hms_opt(ctx.hours.start, 0, 0)
          .unwrap_or_else(|| {
            date.and_time(
              chrono::NaiveTime::MIN
            )
          })
      }
    })
    .collect::<Vec<_>>();

  let now_line = days
    .iter()
    .position(|&date| date == today)
    .and_then(|column| {
      now_line_position(ctx.hours, ctx.now)
        .map(|percent| {
          NowLine { column, percent }
        })
    });

  WeekLayout {
    hour_labels: hours_of_day(
      ctx.date.date(),
      ctx.hours.start,
      ctx.hours.end
    )
    .iter()
    .map(|slot| {
      slot.format("%H:%M").to_string()
    })
    .collect(),
    columns,
    now_line
  }
}

pub fn month_layout(
  ctx: &ViewContext<'_>
) -> MonthLayout {
  let focus = ctx.date.date();
  let today = ctx.today();

  MonthLayout {
    year:           focus.year(),
    month:          focus.month(),
    weekday_labels: weekday_labels(
      &ctx.locale
    ),
    cells:          month_grid(focus)
      .into_iter()
      .map(|date| {
        MonthCell {
          date,
          in_month: date.month()
            == focus.month()
            && date.year() == focus.year(),
          is_today: date == today,
          events: events_on_day(
            ctx.events, date
          )
          .into_iter()
          .cloned()
          .collect()
        }
      })
      .collect()
  }
}

/// Outcome of a click inside a grid slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotClick {
  Event(CalendarEvent),
  Empty(NaiveDateTime)
}

/// Resolves a click given the id of the event element the click landed in,
/// if any. An event hit wins; an unknown id counts as empty space.
pub fn resolve_slot_click(
  events: &[CalendarEvent],
  slot: NaiveDateTime,
  hit_event_id: Option<&str>
) -> SlotClick {
  hit_event_id
    .and_then(|id| {
      events
        .iter()
        .find(|event| event.id == id)
    })
    .map_or(SlotClick::Empty(slot), |event| {
      SlotClick::Event(event.clone())
    })
}

/// `HH:MM` start time shown next to month-view entries.
pub fn format_start_time(
  event: &CalendarEvent
) -> String {
  event.start.format("%H:%M").to_string()
}

pub fn format_time_range(
  event: &CalendarEvent
) -> String {
  format!(
    "{}-{}",
    event.start.format("%H:%M"),
    event.end.format("%H:%M")
  )
}
