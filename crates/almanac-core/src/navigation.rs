use chrono::NaiveDate;
use tracing::debug;

use crate::grid::{
  NavDirection,
  shift_focus
};
use crate::locale::CalendarLocale;
use crate::state::CalendarState;
use crate::view::CalendarView;

/// A navigation request from a control, a hotkey or the date label.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub enum CalendarCommand {
  Prev,
  Next,
  Today,
  ShowView(CalendarView)
}

impl CalendarState {
  pub fn apply(
    &mut self,
    command: CalendarCommand
  ) {
    match command {
      | CalendarCommand::Prev => {
        self.step(NavDirection::Prev);
      }
      | CalendarCommand::Next => {
        self.step(NavDirection::Next);
      }
      | CalendarCommand::Today => {
        self.go_to_today();
      }
      | CalendarCommand::ShowView(view) => {
        self.set_view(view);
      }
    }
  }

  pub fn step(
    &mut self,
    direction: NavDirection
  ) {
    let next = shift_focus(
      self.date(),
      self.view(),
      direction
    );
    debug!(
      from = %self.date().format("%Y-%m-%d"),
      to = %next.format("%Y-%m-%d"),
      view = %self.view(),
      ?direction,
      "calendar moved"
    );
    self.set_date(next);
  }

  pub fn go_to_today(&mut self) {
    debug!(
      today = %self.today().format("%Y-%m-%d"),
      "calendar date reset to today"
    );
    self.set_date(self.today());
  }

  /// Text of the current-date label for the active view.
  pub fn date_label(&self) -> String {
    date_label(
      self.view(),
      self.date().date(),
      &self.locale()
    )
  }
}

/// Full date for the day view, month and year otherwise.
pub fn date_label(
  view: CalendarView,
  date: NaiveDate,
  locale: &CalendarLocale
) -> String {
  match view {
    | CalendarView::Day => {
      locale.format_day(date)
    }
    | CalendarView::Week
    | CalendarView::Month
    | CalendarView::Year => {
      locale.format_month(date)
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    NaiveDate,
    NaiveDateTime
  };

  use super::*;
  use crate::state::CalendarDefaults;
  use crate::viewport::ViewportClass;

  fn at(
    month: u32,
    day: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
      .expect("valid date")
      .and_hms_opt(8, 0, 0)
      .expect("valid time")
  }

  fn state_at(
    view: CalendarView
  ) -> CalendarState {
    CalendarState::new(
      CalendarDefaults {
        view: Some(view),
        date: Some(at(3, 11)),
        ..CalendarDefaults::default()
      },
      at(6, 1),
      ViewportClass::Wide,
      None
    )
  }

  #[test]
  fn prev_next_follow_the_active_view() {
    let mut state =
      state_at(CalendarView::Week);
    state.apply(CalendarCommand::Next);
    assert_eq!(state.date(), at(3, 18));
    state.apply(CalendarCommand::ShowView(
      CalendarView::Month
    ));
    state.apply(CalendarCommand::Prev);
    assert_eq!(state.date(), at(2, 18));
    state.apply(CalendarCommand::ShowView(
      CalendarView::Day
    ));
    state.apply(CalendarCommand::Prev);
    assert_eq!(state.date(), at(2, 17));
  }

  #[test]
  fn repeated_steps_apply_in_order() {
    let mut state =
      state_at(CalendarView::Day);
    for _ in 0..5 {
      state.apply(CalendarCommand::Next);
    }
    state.apply(CalendarCommand::Prev);
    assert_eq!(state.date(), at(3, 15));
  }

  #[test]
  fn today_returns_to_the_creation_instant() {
    let mut state =
      state_at(CalendarView::Month);
    state.apply(CalendarCommand::Next);
    state.apply(CalendarCommand::Today);
    assert_eq!(state.date(), at(6, 1));
    assert_eq!(state.today(), at(6, 1));
  }

  #[test]
  fn label_depends_on_view() {
    let mut state =
      state_at(CalendarView::Day);
    assert_eq!(
      state.date_label(),
      "Monday, March 11, 2024"
    );
    state.set_view(CalendarView::Week);
    assert_eq!(
      state.date_label(),
      "March 2024"
    );
  }
}
