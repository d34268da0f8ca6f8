//! The calendar state container.
//!
//! One `CalendarState` is owned by one mounted calendar. Renderers read it;
//! only the setters below (and the navigation commands built on them) mutate
//! it. Caller-supplied defaults are folded in by [`CalendarState::reconcile`],
//! which diffs the incoming defaults against the last ones it saw so a value
//! the caller did not change never overwrites navigation state.

use std::fmt;
use std::rc::Rc;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::event::CalendarEvent;
use crate::locale::CalendarLocale;
use crate::view::CalendarView;
use crate::viewport::ViewportClass;

/// Receives every view transition, including forced ones.
pub type ViewChangeHandler =
  Rc<dyn Fn(CalendarView)>;

/// Configuration supplied by the embedding caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDefaults {
  pub date:           Option<NaiveDateTime>,
  pub view:           Option<CalendarView>,
  pub events:         Vec<CalendarEvent>,
  pub locale:         CalendarLocale,
  pub enable_hotkeys: bool
}

impl Default for CalendarDefaults {
  fn default() -> Self {
    Self {
      date:           None,
      view:           None,
      events:         Vec::new(),
      locale:         CalendarLocale::default(),
      enable_hotkeys: true
    }
  }
}

pub struct CalendarState {
  view:           CalendarView,
  date:           NaiveDateTime,
  today:          NaiveDateTime,
  locale:         CalendarLocale,
  events:         Vec<CalendarEvent>,
  enable_hotkeys: bool,
  viewport:       ViewportClass,
  last_seen:      CalendarDefaults,
  on_change_view: Option<ViewChangeHandler>
}

impl fmt::Debug for CalendarState {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.debug_struct("CalendarState")
      .field("view", &self.view)
      .field("date", &self.date)
      .field("today", &self.today)
      .field("locale", &self.locale.key())
      .field("events", &self.events.len())
      .field(
        "enable_hotkeys",
        &self.enable_hotkeys
      )
      .field("viewport", &self.viewport)
      .finish_non_exhaustive()
  }
}

impl CalendarState {
  /// `now` becomes both the fallback cursor and the fixed `today`.
  pub fn new(
    defaults: CalendarDefaults,
    now: NaiveDateTime,
    viewport: ViewportClass,
    on_change_view: Option<
      ViewChangeHandler
    >
  ) -> Self {
    let mut state = Self {
      view: defaults
        .view
        .unwrap_or_default(),
      date: defaults.date.unwrap_or(now),
      today: now,
      locale: defaults.locale,
      events: defaults.events.clone(),
      enable_hotkeys: defaults
        .enable_hotkeys,
      viewport,
      last_seen: defaults,
      on_change_view
    };

    debug!(
      view = %state.view,
      date = %state.date,
      viewport = ?state.viewport,
      events = state.events.len(),
      "calendar state created"
    );
    state.enforce_viewport();
    state
  }

  pub fn view(&self) -> CalendarView {
    self.view
  }

  pub fn date(&self) -> NaiveDateTime {
    self.date
  }

  pub fn today(&self) -> NaiveDateTime {
    self.today
  }

  pub fn locale(&self) -> CalendarLocale {
    self.locale
  }

  pub fn events(
    &self
  ) -> &[CalendarEvent] {
    &self.events
  }

  pub fn enable_hotkeys(&self) -> bool {
    self.enable_hotkeys
  }

  pub fn viewport(
    &self
  ) -> ViewportClass {
    self.viewport
  }

  pub fn set_change_handler(
    &mut self,
    handler: Option<ViewChangeHandler>
  ) {
    self.on_change_view = handler;
  }

  /// Assigns the view and notifies the change handler. On a narrow
  /// viewport a non-day view is immediately forced back to day.
  pub fn set_view(
    &mut self,
    view: CalendarView
  ) {
    debug!(
      from = %self.view,
      to = %view,
      "calendar view set"
    );
    self.view = view;
    self.notify_view();
    self.enforce_viewport();
  }

  pub fn set_date(
    &mut self,
    date: NaiveDateTime
  ) {
    debug!(
      from = %self.date,
      to = %date,
      "calendar date set"
    );
    self.date = date;
  }

  pub fn set_events(
    &mut self,
    events: Vec<CalendarEvent>
  ) {
    debug!(
      count = events.len(),
      "calendar events replaced"
    );
    self.events = events;
  }

  /// Records the host viewport class. Returns true when the view was forced
  /// to day. Widening never restores the previous view.
  pub fn set_viewport(
    &mut self,
    viewport: ViewportClass
  ) -> bool {
    if self.viewport != viewport {
      debug!(
        from = ?self.viewport,
        to = ?viewport,
        "calendar viewport changed"
      );
      self.viewport = viewport;
    }
    self.enforce_viewport()
  }

  /// Adopts each caller default that changed since the last call and
  /// differs from current state. Returns true when anything was adopted.
  pub fn reconcile(
    &mut self,
    incoming: &CalendarDefaults
  ) -> bool {
    let mut changed = false;

    if incoming.date != self.last_seen.date
      && let Some(date) = incoming.date
      && date != self.date
    {
      debug!(%date, "adopting caller date");
      self.set_date(date);
      changed = true;
    }

    if incoming.view != self.last_seen.view
      && let Some(view) = incoming.view
      && view != self.view
    {
      debug!(%view, "adopting caller view");
      self.set_view(view);
      changed = true;
    }

    if incoming.events
      != self.last_seen.events
    {
      self.set_events(
        incoming.events.clone()
      );
      changed = true;
    }

    if incoming.locale
      != self.last_seen.locale
      && incoming.locale != self.locale
    {
      debug!(
        locale = incoming.locale.key(),
        "adopting caller locale"
      );
      self.locale = incoming.locale;
      changed = true;
    }

    if incoming.enable_hotkeys
      != self.last_seen.enable_hotkeys
      && incoming.enable_hotkeys
        != self.enable_hotkeys
    {
      debug!(
        enabled = incoming.enable_hotkeys,
        "adopting caller hotkey flag"
      );
      self.enable_hotkeys =
        incoming.enable_hotkeys;
      changed = true;
    }

    self.last_seen = incoming.clone();
    changed
  }

  fn enforce_viewport(&mut self) -> bool {
    if !self.viewport.is_narrow()
      || self.view == CalendarView::Day
    {
      return false;
    }

    debug!(
      from = %self.view,
      "narrow viewport forces day view"
    );
    self.view = CalendarView::Day;
    self.notify_view();
    true
  }

  fn notify_view(&self) {
    if let Some(handler) =
      self.on_change_view.as_ref()
    {
      handler(self.view);
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use chrono::NaiveDate;

  use super::*;

  fn at(
    day: u32,
    hour: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
      .expect("valid date")
      .and_hms_opt(hour, 0, 0)
      .expect("valid time")
  }

  fn recorder() -> (
    Rc<RefCell<Vec<CalendarView>>>,
    ViewChangeHandler
  ) {
    let seen = Rc::new(RefCell::new(
      Vec::<CalendarView>::new()
    ));
    let sink = Rc::clone(&seen);
    let handler: ViewChangeHandler =
      Rc::new(move |view| {
        sink.borrow_mut().push(view);
      });
    (seen, handler)
  }

  #[test]
  fn defaults_to_month_and_now() {
    let state = CalendarState::new(
      CalendarDefaults::default(),
      at(11, 9),
      ViewportClass::Wide,
      None
    );
    assert_eq!(
      state.view(),
      CalendarView::Month
    );
    assert_eq!(state.date(), at(11, 9));
    assert_eq!(state.today(), at(11, 9));
    assert!(state.enable_hotkeys());
  }

  #[test]
  fn narrow_viewport_forces_day_once_on_creation() {
    let (seen, handler) = recorder();
    let state = CalendarState::new(
      CalendarDefaults {
        view: Some(CalendarView::Month),
        ..CalendarDefaults::default()
      },
      at(11, 9),
      ViewportClass::Narrow,
      Some(handler)
    );
    assert_eq!(
      state.view(),
      CalendarView::Day
    );
    assert_eq!(
      *seen.borrow(),
      vec![CalendarView::Day]
    );
  }

  #[test]
  fn narrow_day_creation_does_not_notify() {
    let (seen, handler) = recorder();
    let _state = CalendarState::new(
      CalendarDefaults {
        view: Some(CalendarView::Day),
        ..CalendarDefaults::default()
      },
      at(11, 9),
      ViewportClass::Narrow,
      Some(handler)
    );
    assert!(seen.borrow().is_empty());
  }

  #[test]
  fn narrowing_forces_day_and_widening_keeps_it() {
    let (seen, handler) = recorder();
    let mut state = CalendarState::new(
      CalendarDefaults {
        view: Some(CalendarView::Week),
        ..CalendarDefaults::default()
      },
      at(11, 9),
      ViewportClass::Wide,
      Some(handler)
    );

    assert!(
      state
        .set_viewport(ViewportClass::Narrow)
    );
    assert_eq!(
      state.view(),
      CalendarView::Day
    );
    assert!(
      !state
        .set_viewport(ViewportClass::Narrow)
    );
    assert!(
      !state.set_viewport(ViewportClass::Wide)
    );
    assert_eq!(
      state.view(),
      CalendarView::Day
    );
    assert_eq!(
      *seen.borrow(),
      vec![CalendarView::Day]
    );
  }

  #[test]
  fn set_view_notifies_and_set_date_does_not() {
    let (seen, handler) = recorder();
    let mut state = CalendarState::new(
      CalendarDefaults::default(),
      at(11, 9),
      ViewportClass::Wide,
      Some(handler)
    );
    state.set_date(at(20, 9));
    state.set_view(CalendarView::Week);
    state.set_view(CalendarView::Year);
    assert_eq!(state.date(), at(20, 9));
    assert_eq!(
      *seen.borrow(),
      vec![
        CalendarView::Week,
        CalendarView::Year
      ]
    );
  }

  #[test]
  fn selecting_week_on_narrow_viewport_bounces_back_to_day()
  {
    let (seen, handler) = recorder();
    let mut state = CalendarState::new(
      CalendarDefaults {
        view: Some(CalendarView::Day),
        ..CalendarDefaults::default()
      },
      at(11, 9),
      ViewportClass::Narrow,
      Some(handler)
    );
    state.set_view(CalendarView::Week);
    assert_eq!(
      state.view(),
      CalendarView::Day
    );
    assert_eq!(
      *seen.borrow(),
      vec![
        CalendarView::Week,
        CalendarView::Day
      ]
    );
  }

  #[test]
  fn reconcile_adopts_only_changed_defaults() {
    let defaults = CalendarDefaults {
      date: Some(at(1, 0)),
      view: Some(CalendarView::Month),
      ..CalendarDefaults::default()
    };
    let mut state = CalendarState::new(
      defaults.clone(),
      at(11, 9),
      ViewportClass::Wide,
      None
    );

    // User navigates away from the caller's defaults.
    state.set_date(at(15, 0));
    state.set_view(CalendarView::Week);

    // Same defaults again: nothing is overwritten.
    assert!(!state.reconcile(&defaults));
    assert_eq!(state.date(), at(15, 0));
    assert_eq!(
      state.view(),
      CalendarView::Week
    );

    // Caller changes only the events: navigation state survives.
    let with_events = CalendarDefaults {
      events: vec![CalendarEvent::new(
        "a",
        "Lab",
        at(2, 10),
        at(2, 11)
      )],
      ..defaults.clone()
    };
    assert!(state.reconcile(&with_events));
    assert_eq!(state.events().len(), 1);
    assert_eq!(state.date(), at(15, 0));
    assert_eq!(
      state.view(),
      CalendarView::Week
    );

    // Caller changes the date: adopted.
    let moved = CalendarDefaults {
      date: Some(at(25, 0)),
      ..with_events
    };
    assert!(state.reconcile(&moved));
    assert_eq!(state.date(), at(25, 0));
    assert_eq!(
      state.view(),
      CalendarView::Week
    );
  }

  #[test]
  fn reconcile_view_change_respects_narrow_viewport() {
    let (seen, handler) = recorder();
    let defaults = CalendarDefaults {
      view: Some(CalendarView::Day),
      ..CalendarDefaults::default()
    };
    let mut state = CalendarState::new(
      defaults.clone(),
      at(11, 9),
      ViewportClass::Narrow,
      Some(handler)
    );

    let month = CalendarDefaults {
      view: Some(CalendarView::Month),
      ..defaults
    };
    assert!(state.reconcile(&month));
    assert_eq!(
      state.view(),
      CalendarView::Day
    );
    assert_eq!(
      seen.borrow().last(),
      Some(&CalendarView::Day)
    );
  }
}
