use almanac_core::views::DayLayout;
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

pub(super) fn render_day_view(
  layout: &DayLayout,
  callbacks: &SlotCallbacks
) -> Html {
  html! {
      <div class={classes!("calendar-day-view", layout.is_today.then_some("today"))}>
          <div class="calendar-day-hours">
              {
                  for layout.rows.iter().map(|row| {
                      let onclick = callbacks.slot_handler(row_events(row), row.slot);
                      html! {
                          <div class="calendar-hour-row" onclick={onclick}>
                              <span class="calendar-hour-label">{ row.label() }</span>
                              <div class="calendar-hour-cell">
                                  { for row.events.iter().map(render_placed_event) }
                              </div>
                          </div>
                      }
                  })
              }
              { layout.now_line.map(render_now_line).unwrap_or_default() }
          </div>
      </div>
  }
}
