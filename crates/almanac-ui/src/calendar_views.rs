mod day_view;
mod month_view;
mod week_view;

use almanac_core::{
  CalendarLocale,
  ViewLayout
};
use almanac_core::views::{
  HourRow,
  PlacedEvent,
  SlotClick,
  format_time_range,
  resolve_slot_click
};
use almanac_core::CalendarEvent;
use chrono::NaiveDateTime;
use yew::{
  Callback,
  Html,
  MouseEvent,
  classes,
  html
};

use crate::dom::event_id_from_target;

/// Click targets shared by every grid renderer.
#[derive(Clone, PartialEq)]
pub struct SlotCallbacks {
  pub on_event: Callback<CalendarEvent>,
  pub on_empty: Callback<NaiveDateTime>
}

impl SlotCallbacks {
  /// One handler per slot. A click inside an event element of the slot
  /// reports that event, anything else reports `slot`.
  fn slot_handler(
    &self,
    events: Vec<CalendarEvent>,
    slot: NaiveDateTime
  ) -> Callback<MouseEvent> {
    let on_event = self.on_event.clone();
    let on_empty = self.on_empty.clone();
    Callback::from(move |event: MouseEvent| {
      let hit =
        event_id_from_target(event.target());
      match resolve_slot_click(
        &events,
        slot,
        hit.as_deref()
      ) {
        | SlotClick::Event(event) => {
          on_event.emit(event)
        }
        | SlotClick::Empty(slot) => {
          on_empty.emit(slot)
        }
      }
    })
  }
}

pub fn render_view_layout(
  layout: &ViewLayout,
  locale: &CalendarLocale,
  callbacks: &SlotCallbacks
) -> Html {
  match layout {
    | ViewLayout::Day(day) => {
      day_view::render_day_view(
        day, callbacks
      )
    }
    | ViewLayout::Week(week) => {
      week_view::render_week_view(
        week, locale, callbacks
      )
    }
    | ViewLayout::Month(month) => {
      month_view::render_month_view(
        month, callbacks
      )
    }
    | ViewLayout::Reserved(view) => {
      tracing::debug!(
        %view,
        "view has no renderer"
      );
      Html::default()
    }
  }
}

fn row_events(
  row: &HourRow
) -> Vec<CalendarEvent> {
  row
    .events
    .iter()
    .map(|placed| placed.event.clone())
    .collect()
}

fn event_color_class(
  event: &CalendarEvent
) -> String {
  format!(
    "calendar-event--{}",
    event.color.as_key()
  )
}

/// An absolutely positioned event block inside an hour row. Blocks longer
/// than an hour overflow into the rows below.
fn render_placed_event(
  placed: &PlacedEvent
) -> Html {
  let event = &placed.event;
  let style = format!(
    "top: {:.2}%; height: {:.2}%;",
    placed.offset.top_percent,
    placed.offset.height_percent
  );
  html! {
      <div
          class={classes!("calendar-event", event_color_class(event))}
          data-event-id={event.id.clone()}
          style={style}
          title={event.description.clone().unwrap_or_default()}
      >
          <span class="calendar-event-name">{ &event.name }</span>
          <span class="calendar-event-time">{ format_time_range(event) }</span>
      </div>
  }
}

fn render_now_line(
  percent: f64
) -> Html {
  html! {
      <div class="calendar-now-line" style={format!("top: {percent:.2}%;")}></div>
  }
}
