//! Calendar view engine: date/grid math, event placement, the calendar
//! state container and the per-view layout models that renderers draw.

pub mod config;
pub mod event;
pub mod grid;
pub mod hotkeys;
pub mod layout;
pub mod locale;
pub mod navigation;
pub mod state;
pub mod view;
pub mod viewport;
pub mod views;

pub use config::CalendarConfig;
pub use event::{
  CalendarEvent,
  EventColor,
  EventFlags
};
pub use locale::CalendarLocale;
pub use navigation::CalendarCommand;
pub use state::{
  CalendarDefaults,
  CalendarState
};
pub use view::CalendarView;
pub use viewport::ViewportClass;
pub use views::ViewLayout;
