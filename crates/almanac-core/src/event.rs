use chrono::{
  NaiveDate,
  NaiveDateTime,
  Timelike
};
use serde::{
  Deserialize,
  Serialize
};

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
pub enum EventColor {
  #[default]
  Default,
  Blue,
  Green,
  Pink,
  Purple,
  Indigo
}

impl EventColor {
  pub fn as_key(self) -> &'static str {
    match self {
      | Self::Default => "default",
      | Self::Blue => "blue",
      | Self::Green => "green",
      | Self::Pink => "pink",
      | Self::Purple => "purple",
      | Self::Indigo => "indigo"
    }
  }
}

/// Status flags supplied by upstream sources. Carried through untouched.
#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "camelCase")]
pub struct EventFlags {
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_active:    Option<bool>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_completed: Option<bool>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_cancelled: Option<bool>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_upcoming:  Option<bool>
}

/// A single displayable item. `start` and `end` are local wall-clock
/// instants; `end < start` is not rejected.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct CalendarEvent {
  pub id:          String,
  #[serde(with = "wall_clock_serde")]
  pub start:       NaiveDateTime,
  #[serde(with = "wall_clock_serde")]
  pub end:         NaiveDateTime,
  #[serde(default)]
  pub name:        String,
  #[serde(default)]
  pub color:       EventColor,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  #[serde(flatten)]
  pub flags:       EventFlags
}

impl CalendarEvent {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    start: NaiveDateTime,
    end: NaiveDateTime
  ) -> Self {
    Self {
      id: id.into(),
      start,
      end,
      name: name.into(),
      color: EventColor::Default,
      description: None,
      flags: EventFlags::default()
    }
  }

  #[must_use]
  pub fn with_color(
    mut self,
    color: EventColor
  ) -> Self {
    self.color = color;
    self
  }

  pub fn duration_minutes(&self) -> i64 {
    (self.end - self.start).num_minutes()
  }

  pub fn start_day(&self) -> NaiveDate {
    self.start.date()
  }

  /// True when the event starts in the same calendar hour as `slot`.
  pub fn starts_in_hour(
    &self,
    slot: NaiveDateTime
  ) -> bool {
    self.start.date() == slot.date()
      && self.start.hour() == slot.hour()
  }
}

/// Parses a JSON array of events.
pub fn parse_events_json(
  raw: &str
) -> anyhow::Result<Vec<CalendarEvent>> {
  let events =
    serde_json::from_str::<
      Vec<CalendarEvent>
    >(raw)?;
  tracing::debug!(
    count = events.len(),
    "parsed calendar events"
  );
  Ok(events)
}

/// `YYYY-MM-DDTHH:MM[:SS]` without offset; seconds are optional on input.
pub mod wall_clock_serde {
  use chrono::NaiveDateTime;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  const FORMAT: &str =
    "%Y-%m-%dT%H:%M:%S";
  const SHORT_FORMAT: &str =
    "%Y-%m-%dT%H:%M";

  pub fn serialize<S>(
    dt: &NaiveDateTime,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.serialize_str(
      &dt.format(FORMAT).to_string()
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<NaiveDateTime, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = String::deserialize(
      deserializer
    )?;
    parse(raw.trim())
      .map_err(serde::de::Error::custom)
  }

  pub fn parse(
    raw: &str
  ) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(
      raw, FORMAT
    )
    .or_else(|_| {
      NaiveDateTime::parse_from_str(
        raw,
        SHORT_FORMAT
      )
    })
    .map_err(|error| {
      format!(
        "invalid wall-clock instant \
         {raw:?}: {error}"
      )
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(
    hour: u32,
    minute: u32
  ) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 5)
      .expect("valid date")
      .and_hms_opt(hour, minute, 0)
      .expect("valid time")
  }

  #[test]
  fn parses_events_with_short_timestamps_and_flags() {
    let raw = r#"[
      {
        "id": "lesson-1",
        "start": "2024-03-05T14:00",
        "end": "2024-03-05T15:30:00",
        "name": "Algebra",
        "color": "indigo",
        "isActive": true
      },
      {
        "id": "exam-1",
        "start": "2024-03-06T09:00:00",
        "end": "2024-03-06T11:00:00"
      }
    ]"#;

    let events = parse_events_json(raw)
      .expect("parse events");

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start, at(14, 0));
    assert_eq!(
      events[0].duration_minutes(),
      90
    );
    assert_eq!(
      events[0].color,
      EventColor::Indigo
    );
    assert_eq!(
      events[0].flags.is_active,
      Some(true)
    );
    assert_eq!(
      events[1].color,
      EventColor::Default
    );
    assert!(events[1].name.is_empty());
  }

  #[test]
  fn rejects_timestamps_with_offsets() {
    let raw = r#"[{"id":"x","start":"2024-03-05T14:00:00Z","end":"2024-03-05T15:00:00"}]"#;
    assert!(
      parse_events_json(raw).is_err()
    );
  }

  #[test]
  fn starts_in_hour_requires_same_date_and_hour() {
    let event = CalendarEvent::new(
      "a",
      "Physics",
      at(10, 15),
      at(10, 45)
    );
    assert!(
      event.starts_in_hour(at(10, 0))
    );
    assert!(
      !event.starts_in_hour(at(11, 0))
    );
    let next_day = at(10, 0)
      + chrono::Duration::days(1);
    assert!(
      !event.starts_in_hour(next_day)
    );
  }
}
