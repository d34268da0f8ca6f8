use crate::layout::VisibleHours;

pub const DEFAULT_NARROW_MAX_WIDTH: u32 =
  768;

/// Host viewport class. A narrow viewport forces the day view and a
/// shorter visible hour range.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub enum ViewportClass {
  Narrow,
  #[default]
  Wide
}

impl ViewportClass {
  /// Widths at or below `narrow_max_width` CSS pixels are narrow.
  pub fn classify(
    width: f64,
    narrow_max_width: u32
  ) -> Self {
    if width <= f64::from(narrow_max_width) {
      Self::Narrow
    } else {
      Self::Wide
    }
  }

  pub fn is_narrow(self) -> bool {
    self == Self::Narrow
  }

  pub fn default_hours(
    self
  ) -> VisibleHours {
    match self {
      | Self::Narrow => VisibleHours::NARROW,
      | Self::Wide => VisibleHours::WIDE
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classifies_by_breakpoint() {
    assert_eq!(
      ViewportClass::classify(375.0, 768),
      ViewportClass::Narrow
    );
    assert_eq!(
      ViewportClass::classify(768.0, 768),
      ViewportClass::Narrow
    );
    assert_eq!(
      ViewportClass::classify(1280.0, 768),
      ViewportClass::Wide
    );
  }

  #[test]
  fn narrow_viewports_show_fewer_hours() {
    assert_eq!(
      ViewportClass::Narrow.default_hours(),
      VisibleHours { start: 5, end: 22 }
    );
    assert_eq!(
      ViewportClass::Wide.default_hours(),
      VisibleHours { start: 0, end: 23 }
    );
  }
}
