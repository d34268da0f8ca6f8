use almanac_core::views::{
  MonthCell,
  MonthLayout,
  format_start_time
};
use chrono::Datelike;
use yew::{
  Html,
  classes,
  html
};

use super::{
  SlotCallbacks,
  event_color_class
};

fn render_month_cell(
  cell: &MonthCell,
  callbacks: &SlotCallbacks
) -> Html {
  let onclick = callbacks.slot_handler(
    cell.events.clone(),
    cell.click_slot()
  );

  html! {
      <div
          class={classes!(
              "calendar-day-cell",
              (!cell.in_month).then_some("outside"),
              cell.is_today.then_some("today"),
              (!cell.events.is_empty()).then_some("has-events")
          )}
          onclick={onclick}
      >
          <div class="calendar-day-label">{ cell.date.day() }</div>
          {
              for cell.events.iter().map(|event| html! {
                  <div class="calendar-month-event" data-event-id={event.id.clone()}>
                      <span class={classes!("calendar-dot", event_color_class(event))}></span>
                      <span class="calendar-event-name">{ &event.name }</span>
                      <span class="calendar-event-time">{ format_start_time(event) }</span>
                  </div>
              })
          }
      </div>
  }
}

pub(super) fn render_month_view(
  layout: &MonthLayout,
  callbacks: &SlotCallbacks
) -> Html {
  html! {
      <>
          <div class="calendar-weekday-row">
              {
                  for layout.weekday_labels.iter().map(|label| html! {
                      <div class="calendar-weekday">{ *label }</div>
                  })
              }
          </div>
          <div class="calendar-grid calendar-month-grid">
              { for layout.cells.iter().map(|cell| render_month_cell(cell, callbacks)) }
          </div>
      </>
  }
}
