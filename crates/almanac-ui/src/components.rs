use almanac_core::{
  CalendarCommand,
  CalendarLocale,
  CalendarView
};
use almanac_core::hotkeys::ScopedListener;
use gloo::events::EventListener;
use web_sys::Document;
use yew::{
  Callback,
  Html,
  MouseEvent,
  NodeRef,
  Properties,
  UseStateHandle,
  classes,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_node_ref,
  use_state
};

use crate::dom::{
  contains_target,
  document
};

#[derive(Properties, PartialEq)]
pub struct NavActionsProps {
  pub locale:     CalendarLocale,
  pub on_command: Callback<CalendarCommand>
}

#[function_component(NavActions)]
pub fn nav_actions(
  props: &NavActionsProps
) -> Html {
  let locale = props.locale;
  let command = |command: CalendarCommand| {
    let on_command =
      props.on_command.clone();
    Callback::from(move |_: MouseEvent| {
      on_command.emit(command)
    })
  };

  html! {
      <div class="actions calendar-nav-actions">
          <button class="btn" type="button" onclick={command(CalendarCommand::Prev)}>{ locale.prev_label() }</button>
          <button class="btn" type="button" onclick={command(CalendarCommand::Today)}>{ locale.today_label() }</button>
          <button class="btn" type="button" onclick={command(CalendarCommand::Next)}>{ locale.next_label() }</button>
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct ViewSelectProps {
  pub locale:    CalendarLocale,
  pub current:   CalendarView,
  pub narrow:    bool,
  pub on_select: Callback<CalendarView>
}

/// Day/week/month picker. Year is a valid state value but never offered.
#[function_component(ViewSelect)]
pub fn view_select(
  props: &ViewSelectProps
) -> Html {
  if props.narrow {
    return html! {
        <ViewDropdown
            locale={props.locale}
            current={props.current}
            on_select={props.on_select.clone()}
        />
    };
  }

  html! {
      <div class="calendar-view-switch">
          {
              for CalendarView::selectable().iter().copied().map(|view| {
                  let on_select = props.on_select.clone();
                  let is_active = props.current == view;
                  html! {
                      <button
                          type="button"
                          class={classes!("calendar-view-btn", is_active.then_some("active"))}
                          onclick={Callback::from(move |_| on_select.emit(view))}
                      >
                          { props.locale.view_label(view) }
                      </button>
                  }
              })
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
struct ViewDropdownProps {
  locale:    CalendarLocale,
  current:   CalendarView,
  on_select: Callback<CalendarView>
}

fn outside_listeners(
  document: &Document,
  container: &NodeRef,
  open: &UseStateHandle<bool>
) -> [EventListener; 2] {
  let listen = |event_type: &'static str| {
    let container = container.clone();
    let open = open.clone();
    EventListener::new(
      document,
      event_type,
      move |event| {
        let inside = container
          .get()
          .is_some_and(|node| {
            contains_target(
              &node,
              event.target()
            )
          });
        if !inside {
          open.set(false);
        }
      }
    )
  };
  [
    listen("mousedown"),
    listen("touchstart")
  ]
}

/// Collapsed picker for narrow screens. Outside mousedown/touchstart
/// listeners exist only while the menu is open.
#[function_component(ViewDropdown)]
fn view_dropdown(
  props: &ViewDropdownProps
) -> Html {
  let open = use_state(|| false);
  let container = use_node_ref();
  let outside = use_mut_ref(|| {
    ScopedListener::<[EventListener; 2]>::new(
      "view-select-outside"
    )
  });

  {
    let open = open.clone();
    let container = container.clone();
    let outside = outside.clone();
    use_effect_with(*open, move |is_open| {
      if let Some(document) = document() {
        outside.borrow_mut().sync(
          *is_open,
          || {
            outside_listeners(
              &document, &container, &open
            )
          }
        );
      }
      move || outside.borrow_mut().release()
    });
  }

  let on_toggle = {
    let open = open.clone();
    Callback::from(move |_: MouseEvent| {
      open.set(!*open)
    })
  };

  html! {
      <div class="calendar-view-dropdown" ref={container}>
          <button
              type="button"
              class="btn calendar-view-dropdown-toggle"
              aria-expanded={(*open).to_string()}
              onclick={on_toggle}
          >
              { props.locale.view_label(props.current) }
          </button>
          {
              if *open {
                  html! {
                      <div class="calendar-view-dropdown-menu" role="menu">
                          {
                              for CalendarView::selectable().iter().copied().map(|view| {
                                  let on_select = props.on_select.clone();
                                  let open = open.clone();
                                  let is_active = props.current == view;
                                  html! {
                                      <button
                                          type="button"
                                          role="menuitem"
                                          class={classes!("calendar-view-btn", is_active.then_some("active"))}
                                          onclick={Callback::from(move |_| {
                                              open.set(false);
                                              on_select.emit(view);
                                          })}
                                      >
                                          { props.locale.view_label(view) }
                                      </button>
                                  }
                              })
                          }
                      </div>
                  }
              } else {
                  Html::default()
              }
          }
      </div>
  }
}

#[derive(Properties, PartialEq)]
pub struct CurrentDateLabelProps {
  pub label:    String,
  pub on_click: Callback<MouseEvent>
}

#[function_component(CurrentDateLabel)]
pub fn current_date_label(
  props: &CurrentDateLabelProps
) -> Html {
  html! {
      <button
          type="button"
          class="calendar-current-date"
          onclick={props.on_click.clone()}
      >
          { &props.label }
      </button>
  }
}
