use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{
  Deserialize,
  Deserializer,
  Serialize
};
use tracing::{
  info,
  warn
};

use crate::layout::VisibleHours;
use crate::locale::CalendarLocale;
use crate::state::CalendarDefaults;
use crate::view::CalendarView;
use crate::viewport::{
  DEFAULT_NARROW_MAX_WIDTH,
  ViewportClass
};

fn config_true() -> bool {
  true
}

fn config_default_version() -> u32 {
  1
}

fn config_default_view() -> String {
  CalendarView::Month.as_key().to_string()
}

fn config_default_locale() -> String {
  CalendarLocale::english()
    .key()
    .to_string()
}

fn config_default_narrow_max_width()
-> u32 {
  DEFAULT_NARROW_MAX_WIDTH
}

fn config_default_narrow_hours()
-> VisibleHours {
  VisibleHours::NARROW
}

fn config_default_wide_hours()
-> VisibleHours {
  VisibleHours::WIDE
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct CalendarConfig {
  #[serde(
    default = "config_default_version"
  )]
  pub version:        u32,
  #[serde(default = "config_default_view")]
  pub default_view:   String,
  #[serde(
    default = "config_default_locale"
  )]
  pub locale:         String,
  #[serde(default = "config_true")]
  pub enable_hotkeys: bool,
  #[serde(default)]
  pub viewport:       ViewportPolicy,
  #[serde(default)]
  pub hours:          HourPolicy
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct ViewportPolicy {
  #[serde(
    default = "config_default_narrow_max_width"
  )]
  pub narrow_max_width: u32
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct HourPolicy {
  #[serde(
    default = "config_default_narrow_hours",
    deserialize_with = "deserialize_narrow_hours"
  )]
  pub narrow: VisibleHours,
  #[serde(
    default = "config_default_wide_hours",
    deserialize_with = "deserialize_wide_hours"
  )]
  pub wide:   VisibleHours
}

/// An `[hours.*]` table where either bound may be omitted.
#[derive(Debug, Default, Deserialize)]
struct HoursTable {
  #[serde(default)]
  start: Option<u32>,
  #[serde(default)]
  end:   Option<u32>
}

impl HoursTable {
  fn or_default(
    self,
    fallback: VisibleHours
  ) -> VisibleHours {
    VisibleHours {
      start: self
        .start
        .unwrap_or(fallback.start),
      end:   self.end.unwrap_or(fallback.end)
    }
  }
}

fn deserialize_narrow_hours<'de, D>(
  deserializer: D
) -> Result<VisibleHours, D::Error>
where
  D: Deserializer<'de>
{
  HoursTable::deserialize(deserializer)
    .map(|table| {
      table.or_default(VisibleHours::NARROW)
    })
}

fn deserialize_wide_hours<'de, D>(
  deserializer: D
) -> Result<VisibleHours, D::Error>
where
  D: Deserializer<'de>
{
  HoursTable::deserialize(deserializer)
    .map(|table| {
      table.or_default(VisibleHours::WIDE)
    })
}

impl Default for CalendarConfig {
  fn default() -> Self {
    Self {
      version:        config_default_version(),
      default_view:   config_default_view(),
      locale:         config_default_locale(),
      enable_hotkeys: true,
      viewport:       ViewportPolicy::default(),
      hours:          HourPolicy::default()
    }
  }
}

impl Default for ViewportPolicy {
  fn default() -> Self {
    Self {
      narrow_max_width:
        config_default_narrow_max_width()
    }
  }
}

impl Default for HourPolicy {
  fn default() -> Self {
    Self {
      narrow: config_default_narrow_hours(),
      wide:   config_default_wide_hours()
    }
  }
}

impl CalendarConfig {
  /// Parses TOML and repairs out-of-range values.
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut config =
      toml::from_str::<Self>(raw)
        .context(
          "failed parsing calendar config"
        )?;
    config.sanitize();
    info!(
      version = config.version,
      view = %config.default_view,
      locale = %config.locale,
      "loaded calendar config"
    );
    Ok(config)
  }

  #[tracing::instrument]
  pub fn load_from_path(
    path: &Path
  ) -> anyhow::Result<Self> {
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read {}",
          path.display()
        )
      })?;
    Self::from_toml_str(&raw).with_context(
      || {
        format!(
          "invalid calendar config {}",
          path.display()
        )
      }
    )
  }

  pub fn sanitize(&mut self) {
    if CalendarView::from_key(
      &self.default_view
    )
    .is_none()
    {
      warn!(
        view = %self.default_view,
        "unknown default view; using month"
      );
      self.default_view =
        config_default_view();
    }

    if CalendarLocale::from_key(
      &self.locale
    )
    .is_none()
    {
      warn!(
        locale = %self.locale,
        "unknown locale; using en"
      );
      self.locale =
        config_default_locale();
    }

    if self.viewport.narrow_max_width == 0
    {
      self.viewport.narrow_max_width =
        config_default_narrow_max_width();
    }

    for (name, hours) in [
      ("narrow", &mut self.hours.narrow),
      ("wide", &mut self.hours.wide),
    ] {
      let repaired =
        VisibleHours::new(hours.start, hours.end);
      if repaired != *hours {
        warn!(
          range = name,
          start = hours.start,
          end = hours.end,
          "visible hours out of range; clamped"
        );
        *hours = repaired;
      }
    }
  }

  pub fn default_view(
    &self
  ) -> CalendarView {
    CalendarView::from_key(
      &self.default_view
    )
    .unwrap_or_default()
  }

  pub fn calendar_locale(
    &self
  ) -> CalendarLocale {
    CalendarLocale::from_key(&self.locale)
      .unwrap_or_default()
  }

  pub fn classify_viewport(
    &self,
    width: f64
  ) -> ViewportClass {
    ViewportClass::classify(
      width,
      self.viewport.narrow_max_width
    )
  }

  pub fn visible_hours(
    &self,
    viewport: ViewportClass
  ) -> VisibleHours {
    match viewport {
      | ViewportClass::Narrow => {
        self.hours.narrow
      }
      | ViewportClass::Wide => {
        self.hours.wide
      }
    }
  }

  /// Caller defaults seeded from this config.
  pub fn defaults(&self) -> CalendarDefaults {
    CalendarDefaults {
      view: Some(self.default_view()),
      locale: self.calendar_locale(),
      enable_hotkeys: self.enable_hotkeys,
      ..CalendarDefaults::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_document_yields_defaults() {
    let config =
      CalendarConfig::from_toml_str("")
        .expect("parse empty config");
    assert_eq!(config, CalendarConfig::default());
    assert_eq!(
      config.default_view(),
      CalendarView::Month
    );
    assert_eq!(
      config.visible_hours(
        ViewportClass::Narrow
      ),
      VisibleHours::NARROW
    );
  }

  #[test]
  fn parses_nested_sections() {
    let config = CalendarConfig::from_toml_str(
      r#"
default_view = "week"
locale = "pt-BR"
enable_hotkeys = false

[viewport]
narrow_max_width = 600

[hours.wide]
start = 7
end = 20
"#
    )
    .expect("parse config");

    assert_eq!(
      config.default_view(),
      CalendarView::Week
    );
    assert_eq!(
      config.calendar_locale().key(),
      "pt"
    );
    assert!(!config.enable_hotkeys);
    assert_eq!(
      config.classify_viewport(640.0),
      ViewportClass::Wide
    );
    assert_eq!(
      config.visible_hours(ViewportClass::Wide),
      VisibleHours { start: 7, end: 20 }
    );
    assert_eq!(
      config.hours.narrow,
      VisibleHours::NARROW
    );

    let defaults = config.defaults();
    assert_eq!(
      defaults.view,
      Some(CalendarView::Week)
    );
    assert!(!defaults.enable_hotkeys);
  }

  #[test]
  fn sanitize_repairs_bad_values() {
    let config = CalendarConfig::from_toml_str(
      r#"
default_view = "agenda"
locale = "tlh"

[viewport]
narrow_max_width = 0

[hours.narrow]
start = 30
end = 2
"#
    )
    .expect("parse config");

    assert_eq!(config.default_view, "month");
    assert_eq!(config.locale, "en");
    assert_eq!(
      config.viewport.narrow_max_width,
      DEFAULT_NARROW_MAX_WIDTH
    );
    assert_eq!(
      config.hours.narrow,
      VisibleHours { start: 23, end: 23 }
    );
  }

  #[test]
  fn partial_hour_tables_keep_the_other_bound() {
    let config = CalendarConfig::from_toml_str(
      r#"
[hours.wide]
start = 7

[hours.narrow]
end = 20
"#
    )
    .expect("parse partial hours");

    assert_eq!(
      config.hours.wide,
      VisibleHours { start: 7, end: 23 }
    );
    assert_eq!(
      config.hours.narrow,
      VisibleHours { start: 5, end: 20 }
    );
  }

  #[test]
  fn partial_hour_table_is_sanitized() {
    let config = CalendarConfig::from_toml_str(
      "[hours.narrow]\nstart = 23\n"
    )
    .expect("parse partial hours");

    assert_eq!(
      config.hours.narrow,
      VisibleHours { start: 23, end: 23 }
    );
    assert_eq!(
      config.hours.wide,
      VisibleHours::WIDE
    );
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(
      CalendarConfig::from_toml_str(
        "default_view = ["
      )
      .is_err()
    );
  }
}
