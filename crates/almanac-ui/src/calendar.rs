use std::cell::RefCell;
use std::rc::Rc;

use almanac_core::hotkeys::{
  ScopedListener,
  hotkey_command
};
use almanac_core::state::ViewChangeHandler;
use almanac_core::views::{
  ViewContext,
  build_view_layout
};
use almanac_core::{
  CalendarCommand,
  CalendarConfig,
  CalendarDefaults,
  CalendarEvent,
  CalendarLocale,
  CalendarState,
  CalendarView,
  ViewportClass
};
use chrono::{
  Local,
  NaiveDateTime
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
  EventTarget,
  KeyboardEvent
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  UseForceUpdateHandle,
  function_component,
  html,
  use_effect_with,
  use_force_update,
  use_mut_ref
};

use crate::calendar_views::{
  SlotCallbacks,
  render_view_layout
};
use crate::components::{
  CurrentDateLabel,
  NavActions,
  ViewSelect
};
use crate::dom;

type SharedState = Rc<RefCell<CalendarState>>;

#[derive(Properties, PartialEq)]
pub struct CalendarProps {
  #[prop_or_default]
  pub default_date: Option<NaiveDateTime>,
  #[prop_or_default]
  pub events: Vec<CalendarEvent>,
  #[prop_or_default]
  pub view: Option<CalendarView>,
  #[prop_or_default]
  pub locale: CalendarLocale,
  #[prop_or(true)]
  pub enable_hotkeys: bool,
  #[prop_or_default]
  pub config: Rc<CalendarConfig>,
  #[prop_or_default]
  pub on_change_view:
    Option<Callback<CalendarView>>,
  #[prop_or_default]
  pub on_event_click:
    Option<Callback<CalendarEvent>>,
  #[prop_or_default]
  pub on_empty_date_click:
    Option<Callback<NaiveDateTime>>,
  /// Replaces the default reset-to-today action of the date label.
  #[prop_or_default]
  pub on_date_label_click:
    Option<Callback<()>>,
  #[prop_or_default]
  pub header: Html
}

impl CalendarProps {
  fn defaults(&self) -> CalendarDefaults {
    CalendarDefaults {
      date:           self.default_date,
      view:           self.view,
      events:         self.events.clone(),
      locale:         self.locale,
      enable_hotkeys: self.enable_hotkeys
    }
  }

  fn change_handler(
    &self
  ) -> Option<ViewChangeHandler> {
    self.on_change_view.clone().map(
      |callback| {
        Rc::new(move |view: CalendarView| {
          callback.emit(view)
        }) as ViewChangeHandler
      }
    )
  }
}

fn current_viewport(
  config: &CalendarConfig
) -> ViewportClass {
  dom::viewport_width().map_or(
    ViewportClass::default(),
    |width| {
      config.classify_viewport(width)
    }
  )
}

fn run_command(
  state: &SharedState,
  trigger: &UseForceUpdateHandle,
  command: CalendarCommand
) {
  let (from, to, view) = {
    let mut state = state.borrow_mut();
    let from = state.date();
    state.apply(command);
    (from, state.date(), state.view())
  };
  tracing::debug!(
    ?command,
    from = %from.format("%Y-%m-%d"),
    to = %to.format("%Y-%m-%d"),
    view = %view,
    "calendar command"
  );
  trigger.force_update();
}

fn hotkey_listener(
  target: &EventTarget,
  state: SharedState,
  trigger: UseForceUpdateHandle
) -> EventListener {
  EventListener::new(
    target,
    "keydown",
    move |event| {
      let Some(event) =
        event.dyn_ref::<KeyboardEvent>()
      else {
        return;
      };
      if dom::is_editable_target(
        event.target()
      ) {
        return;
      }
      let Some(command) = hotkey_command(
        &event.key(),
        dom::key_modifiers(event)
      ) else {
        return;
      };
      event.prevent_default();
      run_command(&state, &trigger, command);
    }
  )
}

#[function_component(Calendar)]
pub fn calendar(
  props: &CalendarProps
) -> Html {
  let trigger = use_force_update();
  let defaults = props.defaults();

  let state = {
    let defaults = defaults.clone();
    let config = props.config.clone();
    let handler = props.change_handler();
    use_mut_ref(move || {
      CalendarState::new(
        defaults,
        Local::now().naive_local(),
        current_viewport(&config),
        handler
      )
    })
  };
  state
    .borrow_mut()
    .set_change_handler(
      props.change_handler()
    );

  {
    let state = state.clone();
    let trigger = trigger.clone();
    use_effect_with(
      defaults,
      move |defaults| {
        if state
          .borrow_mut()
          .reconcile(defaults)
        {
          trigger.force_update();
        }
        || ()
      }
    );
  }

  {
    let state = state.clone();
    let trigger = trigger.clone();
    use_effect_with(
      props.config.clone(),
      move |config| {
        let config = config.clone();
        let listener = web_sys::window()
          .map(|window| {
            EventListener::new(
              &window,
              "resize",
              move |_| {
                let viewport =
                  current_viewport(&config);
                let changed = {
                  let mut state =
                    state.borrow_mut();
                  let before =
                    state.viewport();
                  let forced = state
                    .set_viewport(viewport);
                  forced || before != viewport
                };
                if changed {
                  trigger.force_update();
                }
              }
            )
          });
        move || drop(listener)
      }
    );
  }

  let hotkeys = use_mut_ref(|| {
    ScopedListener::<EventListener>::new(
      "calendar-hotkeys"
    )
  });
  {
    let enabled =
      state.borrow().enable_hotkeys();
    let state = state.clone();
    let trigger = trigger.clone();
    let hotkeys = hotkeys.clone();
    use_effect_with(
      enabled,
      move |enabled| {
        if let Some(document) =
          dom::document()
        {
          hotkeys.borrow_mut().sync(
            *enabled,
            || {
              hotkey_listener(
                &document, state, trigger
              )
            }
          );
        }
        move || hotkeys.borrow_mut().release()
      }
    );
  }

  let on_command = {
    let state = state.clone();
    let trigger = trigger.clone();
    Callback::from(
      move |command: CalendarCommand| {
        run_command(
          &state, &trigger, command
        )
      }
    )
  };

  let on_select_view = {
    let on_command = on_command.clone();
    Callback::from(
      move |view: CalendarView| {
        on_command.emit(
          CalendarCommand::ShowView(view)
        )
      }
    )
  };

  let on_label_click = {
    let on_command = on_command.clone();
    let override_click =
      props.on_date_label_click.clone();
    Callback::from(
      move |_: MouseEvent| {
        match &override_click {
          | Some(callback) => {
            callback.emit(())
          }
          | None => {
            on_command.emit(
              CalendarCommand::Today
            )
          }
        }
      }
    )
  };

  let callbacks = SlotCallbacks {
    on_event: {
      let on_event_click =
        props.on_event_click.clone();
      Callback::from(
        move |event: CalendarEvent| {
          tracing::debug!(
            id = %event.id,
            "calendar event clicked"
          );
          if let Some(callback) =
            &on_event_click
          {
            callback.emit(event);
          }
        }
      )
    },
    on_empty: {
      let on_empty_date_click =
        props.on_empty_date_click.clone();
      Callback::from(
        move |slot: NaiveDateTime| {
          tracing::debug!(
            %slot,
            "calendar empty slot clicked"
          );
          if let Some(callback) =
            &on_empty_date_click
          {
            callback.emit(slot);
          }
        }
      )
    }
  };

  let snapshot = state.borrow();
  let viewport = snapshot.viewport();
  let ctx = ViewContext::from_state(
    &snapshot,
    Local::now().naive_local(),
    props.config.visible_hours(viewport)
  );
  let layout = build_view_layout(&ctx);
  let label = snapshot.date_label();
  let current_view = snapshot.view();
  let locale = snapshot.locale();
  drop(snapshot);

  html! {
      <div class="calendar">
          <div class="calendar-header">{ props.header.clone() }</div>
          <div class="calendar-toolbar">
              <NavActions locale={locale} on_command={on_command} />
              <CurrentDateLabel label={label} on_click={on_label_click} />
              <ViewSelect
                  locale={locale}
                  current={current_view}
                  narrow={viewport.is_narrow()}
                  on_select={on_select_view}
              />
          </div>
          <div class="calendar-body">
              { render_view_layout(&layout, &locale, &callbacks) }
          </div>
      </div>
  }
}
