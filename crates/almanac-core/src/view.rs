use serde::{
  Deserialize,
  Serialize
};

/// Rendering mode. `Year` is a valid state value but has no renderer and
/// is not offered by the view-select control.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
  Day,
  Week,
  #[default]
  Month,
  Year
}

impl CalendarView {
  pub fn all() -> [Self; 4] {
    [
      Self::Day,
      Self::Week,
      Self::Month,
      Self::Year
    ]
  }

  /// Views offered by the view-select control.
  pub fn selectable() -> [Self; 3] {
    [Self::Day, Self::Week, Self::Month]
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Day => "day",
      | Self::Week => "week",
      | Self::Month => "month",
      | Self::Year => "year"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "day" => Some(Self::Day),
      | "week" => Some(Self::Week),
      | "month" => Some(Self::Month),
      | "year" => Some(Self::Year),
      | _ => None
    }
  }
}

impl std::fmt::Display for CalendarView {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>
  ) -> std::fmt::Result {
    f.write_str(self.as_key())
  }
}
