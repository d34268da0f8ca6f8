use std::rc::Rc;

use almanac_core::event::parse_events_json;
use almanac_core::{
  CalendarConfig,
  CalendarEvent,
  CalendarView
};
use chrono::NaiveDateTime;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_memo,
  use_state
};

use crate::calendar::Calendar;

const CONFIG_TOML: &str =
  include_str!("../assets/calendar.toml");
const DEMO_EVENTS_JSON: &str =
  include_str!("../assets/events.json");

fn load_config() -> CalendarConfig {
  match CalendarConfig::from_toml_str(
    CONFIG_TOML
  ) {
    | Ok(config) => config,
    | Err(err) => {
      tracing::error!(
        error = %format!("{err:#}"),
        "embedded calendar config rejected; using defaults"
      );
      CalendarConfig::default()
    }
  }
}

fn load_demo_events() -> Vec<CalendarEvent> {
  parse_events_json(DEMO_EVENTS_JSON)
    .unwrap_or_else(|err| {
      tracing::error!(
        error = %format!("{err:#}"),
        "embedded demo events rejected"
      );
      Vec::new()
    })
}

#[function_component(App)]
pub fn app() -> Html {
  let config =
    use_memo((), |_| load_config());
  let events =
    use_memo((), |_| load_demo_events());
  let status =
    use_state(|| None::<String>);

  let on_change_view = {
    let status = status.clone();
    Callback::from(
      move |view: CalendarView| {
        tracing::info!(%view, "calendar view changed");
        status.set(Some(format!(
          "Showing {} view",
          view.as_key()
        )));
      }
    )
  };

  let on_event_click = {
    let status = status.clone();
    Callback::from(
      move |event: CalendarEvent| {
        tracing::info!(
          id = %event.id,
          name = %event.name,
          "event selected"
        );
        status.set(Some(format!(
          "{} ({} - {})",
          event.name,
          event.start.format("%b %d %H:%M"),
          event.end.format("%H:%M")
        )));
      }
    )
  };

  let on_empty_date_click = {
    let status = status.clone();
    Callback::from(
      move |slot: NaiveDateTime| {
        tracing::info!(%slot, "empty slot selected");
        status.set(Some(format!(
          "Free slot {}",
          slot.format("%Y-%m-%d %H:%M")
        )));
      }
    )
  };

  let default_date = events
    .iter()
    .map(|event| event.start)
    .min();

  let header = html! {
      <div class="calendar-title">
          <h1>{ "Course calendar" }</h1>
          <p class="calendar-status">
              { (*status).clone().unwrap_or_else(|| "Press m, w or d to switch views".to_string()) }
          </p>
      </div>
  };

  html! {
      <main class="app">
          <Calendar
              default_date={default_date}
              events={(*events).clone()}
              view={config.default_view()}
              locale={config.calendar_locale()}
              enable_hotkeys={config.enable_hotkeys}
              config={Rc::clone(&config)}
              on_change_view={on_change_view}
              on_event_click={on_event_click}
              on_empty_date_click={on_empty_date_click}
              header={header}
          />
      </main>
  }
}
