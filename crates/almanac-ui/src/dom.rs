use almanac_core::hotkeys::KeyModifiers;
use wasm_bindgen::JsCast;
use web_sys::{
  Document,
  Element,
  EventTarget,
  HtmlElement,
  KeyboardEvent,
  Node
};

pub const EVENT_ID_ATTR: &str =
  "data-event-id";

pub fn document() -> Option<Document> {
  web_sys::window()
    .and_then(|window| window.document())
}

pub fn viewport_width() -> Option<f64> {
  web_sys::window()
    .and_then(|window| {
      window.inner_width().ok()
    })
    .and_then(|width| width.as_f64())
}

pub fn key_modifiers(
  event: &KeyboardEvent
) -> KeyModifiers {
  KeyModifiers {
    ctrl:  event.ctrl_key(),
    alt:   event.alt_key(),
    meta:  event.meta_key(),
    shift: event.shift_key()
  }
}

/// Typing into a field must not trigger calendar shortcuts.
pub fn is_editable_target(
  target: Option<EventTarget>
) -> bool {
  let Some(element) = target
    .and_then(|target| {
      target.dyn_into::<Element>().ok()
    })
  else {
    return false;
  };

  let tag =
    element.tag_name().to_ascii_lowercase();
  if matches!(
    tag.as_str(),
    "input" | "textarea" | "select"
  ) {
    return true;
  }

  element
    .dyn_ref::<HtmlElement>()
    .is_some_and(|html| {
      html.is_content_editable()
    })
}

/// Id of the event element the target sits in, found by walking up the
/// DOM ancestry.
pub fn event_id_from_target(
  target: Option<EventTarget>
) -> Option<String> {
  target
    .and_then(|target| {
      target.dyn_into::<Element>().ok()
    })
    .and_then(|element| {
      element
        .closest(&format!(
          "[{EVENT_ID_ATTR}]"
        ))
        .ok()
        .flatten()
    })
    .and_then(|element| {
      element.get_attribute(EVENT_ID_ATTR)
    })
}

pub fn contains_target(
  container: &Node,
  target: Option<EventTarget>
) -> bool {
  let node = target.and_then(|target| {
    target.dyn_into::<Node>().ok()
  });
  node.is_some_and(|node| {
    container.contains(Some(&node))
  })
}
