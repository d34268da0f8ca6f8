use almanac_core::CalendarLocale;
use almanac_core::views::{
  WeekColumn,
  WeekLayout
};
use chrono::Datelike;
use yew::{
  Html,
  classes,
  html
};

use super::{
  SlotCallbacks,
  render_now_line,
  render_placed_event,
  row_events
};

fn render_week_column(
  column: &WeekColumn,
  now_line: Option<f64>,
  callbacks: &SlotCallbacks
) -> Html {
  html! {
      <div class={classes!("calendar-week-column", column.is_today.then_some("today"))}>
          {
              for column.rows.iter().map(|row| {
                  let onclick = callbacks.slot_handler(row_events(row), column.click_slot);
                  html! {
                      <div class="calendar-hour-cell" onclick={onclick}>
                          { for row.events.iter().map(render_placed_event) }
                      </div>
                  }
              })
          }
          { now_line.map(render_now_line).unwrap_or_default() }
      </div>
  }
}

pub(super) fn render_week_view(
  layout: &WeekLayout,
  locale: &CalendarLocale,
  callbacks: &SlotCallbacks
) -> Html {
  html! {
      <div class="calendar-week-view">
          <div class="calendar-week-header">
              <div class="calendar-hour-label"></div>
              {
                  for layout.columns.iter().map(|column| html! {
                      <div
                          class={classes!("calendar-week-day", column.is_today.then_some("today"))}
                          title={locale.event_count(column.event_count)}
                      >
                          <span class="calendar-weekday">{ column.weekday_label }</span>
                          <span class="calendar-day-number">{ column.date.day() }</span>
                      </div>
                  })
              }
          </div>
          <div class="calendar-week-body">
              <div class="calendar-hour-labels">
                  {
                      for layout.hour_labels.iter().map(|label| html! {
                          <span class="calendar-hour-label">{ label }</span>
                      })
                  }
              </div>
              {
                  for layout.columns.iter().enumerate().map(|(idx, column)| {
                      let now_line = layout
                          .now_line
                          .as_ref()
                          .filter(|line| line.column == idx)
                          .map(|line| line.percent);
                      render_week_column(column, now_line, callbacks)
                  })
              }
          </div>
      </div>
  }
}
