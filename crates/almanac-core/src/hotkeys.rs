//! Keyboard shortcuts and scoped listener ownership.

use tracing::debug;

use crate::navigation::CalendarCommand;
use crate::view::CalendarView;

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct KeyModifiers {
  pub ctrl:  bool,
  pub alt:   bool,
  pub meta:  bool,
  pub shift: bool
}

impl KeyModifiers {
  fn has_command_modifier(self) -> bool {
    self.ctrl || self.alt || self.meta
  }
}

/// Maps a `KeyboardEvent.key` value to a calendar command. Chords with
/// ctrl/alt/meta are left to the host.
pub fn hotkey_command(
  key: &str,
  modifiers: KeyModifiers
) -> Option<CalendarCommand> {
  if modifiers.has_command_modifier() {
    return None;
  }

  match key {
    | "ArrowLeft" => {
      Some(CalendarCommand::Prev)
    }
    | "ArrowRight" => {
      Some(CalendarCommand::Next)
    }
    | "m" | "M" => {
      Some(CalendarCommand::ShowView(
        CalendarView::Month
      ))
    }
    | "w" | "W" => {
      Some(CalendarCommand::ShowView(
        CalendarView::Week
      ))
    }
    | "d" | "D" => {
      Some(CalendarCommand::ShowView(
        CalendarView::Day
      ))
    }
    | "t" | "T" => {
      Some(CalendarCommand::Today)
    }
    | _ => None
  }
}

/// Holds a listener guard while a condition is true.
///
/// The guard type releases its registration on drop (for example a DOM
/// event listener handle). `sync` acquires or drops it so the registration
/// lives exactly as long as the condition and the owner.
pub struct ScopedListener<G> {
  name:  &'static str,
  guard: Option<G>
}

impl<G> ScopedListener<G> {
  pub fn new(name: &'static str) -> Self {
    Self { name, guard: None }
  }

  pub fn is_active(&self) -> bool {
    self.guard.is_some()
  }

  /// Returns true when a guard was acquired or released.
  pub fn sync<F>(
    &mut self,
    active: bool,
    acquire: F
  ) -> bool
  where
    F: FnOnce() -> G
  {
    match (active, self.guard.is_some()) {
      | (true, false) => {
        debug!(
          listener = self.name,
          "listener acquired"
        );
        self.guard = Some(acquire());
        true
      }
      | (false, true) => {
        self.release();
        true
      }
      | _ => false
    }
  }

  pub fn release(&mut self) {
    if self.guard.take().is_some() {
      debug!(
        listener = self.name,
        "listener released"
      );
    }
  }
}

impl<G> std::fmt::Debug
  for ScopedListener<G>
{
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.debug_struct("ScopedListener")
      .field("name", &self.name)
      .field("active", &self.is_active())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::rc::Rc;

  use super::*;

  struct CountingGuard(Rc<Cell<i32>>);

  impl CountingGuard {
    fn new(live: &Rc<Cell<i32>>) -> Self {
      live.set(live.get() + 1);
      Self(Rc::clone(live))
    }
  }

  impl Drop for CountingGuard {
    fn drop(&mut self) {
      self.0.set(self.0.get() - 1);
    }
  }

  #[test]
  fn maps_the_documented_keys() {
    let none = KeyModifiers::default();
    assert_eq!(
      hotkey_command("m", none),
      Some(CalendarCommand::ShowView(
        CalendarView::Month
      ))
    );
    assert_eq!(
      hotkey_command("w", none),
      Some(CalendarCommand::ShowView(
        CalendarView::Week
      ))
    );
    assert_eq!(
      hotkey_command("d", none),
      Some(CalendarCommand::ShowView(
        CalendarView::Day
      ))
    );
    assert_eq!(
      hotkey_command("t", none),
      Some(CalendarCommand::Today)
    );
    assert_eq!(
      hotkey_command("ArrowLeft", none),
      Some(CalendarCommand::Prev)
    );
    assert_eq!(
      hotkey_command("ArrowRight", none),
      Some(CalendarCommand::Next)
    );
    assert_eq!(
      hotkey_command("y", none),
      None
    );
  }

  #[test]
  fn ignores_command_chords() {
    let ctrl = KeyModifiers {
      ctrl: true,
      ..KeyModifiers::default()
    };
    assert_eq!(
      hotkey_command("t", ctrl),
      None
    );
    let shift = KeyModifiers {
      shift: true,
      ..KeyModifiers::default()
    };
    assert_eq!(
      hotkey_command("T", shift),
      Some(CalendarCommand::Today)
    );
  }

  #[test]
  fn scoped_listener_tracks_the_flag() {
    let live = Rc::new(Cell::new(0));
    let mut listener =
      ScopedListener::new("keydown");

    assert!(listener.sync(true, || {
      CountingGuard::new(&live)
    }));
    assert_eq!(live.get(), 1);

    // Already registered: no second registration.
    assert!(!listener.sync(true, || {
      CountingGuard::new(&live)
    }));
    assert_eq!(live.get(), 1);

    assert!(listener.sync(false, || {
      CountingGuard::new(&live)
    }));
    assert_eq!(live.get(), 0);
    assert!(!listener.is_active());
  }

  #[test]
  fn dropping_the_owner_releases_the_guard() {
    let live = Rc::new(Cell::new(0));
    {
      let mut listener =
        ScopedListener::new("outside-click");
      listener.sync(true, || {
        CountingGuard::new(&live)
      });
      assert_eq!(live.get(), 1);
    }
    assert_eq!(live.get(), 0);
  }
}
