//! Localized weekday and month names. Weeks always start on Sunday.

use chrono::{
  Datelike,
  NaiveDate
};

use crate::view::CalendarView;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
enum DayLabelOrder {
  /// `Monday, March 11, 2024`
  MonthFirst,
  /// `lunes, 11 de marzo de 2024`
  DayFirstWithDe,
  /// `lundi 11 mars 2024`
  DayFirst
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct CalendarLocale {
  key:            &'static str,
  weekdays_short: [&'static str; 7],
  weekdays_long:  [&'static str; 7],
  months:         [&'static str; 12],
  order:          DayLabelOrder,
  controls:       ControlLabels
}

/// Toolbar and summary text.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
struct ControlLabels {
  prev:   &'static str,
  today:  &'static str,
  next:   &'static str,
  /// Day, week, month, year.
  views:  [&'static str; 4],
  events: &'static str
}

const ENGLISH: CalendarLocale =
  CalendarLocale {
    key:            "en",
    weekdays_short: [
      "Sun", "Mon", "Tue", "Wed", "Thu",
      "Fri", "Sat"
    ],
    weekdays_long:  [
      "Sunday",
      "Monday",
      "Tuesday",
      "Wednesday",
      "Thursday",
      "Friday",
      "Saturday"
    ],
    months:         [
      "January",
      "February",
      "March",
      "April",
      "May",
      "June",
      "July",
      "August",
      "September",
      "October",
      "November",
      "December"
    ],
    order:          DayLabelOrder::MonthFirst,
    controls:       ControlLabels {
      prev:   "Prev",
      today:  "Today",
      next:   "Next",
      views:  ["Day", "Week", "Month", "Year"],
      events: "events"
    }
  };

const SPANISH: CalendarLocale =
  CalendarLocale {
    key:            "es",
    weekdays_short: [
      "dom", "lun", "mar", "mié", "jue",
      "vie", "sáb"
    ],
    weekdays_long:  [
      "domingo",
      "lunes",
      "martes",
      "miércoles",
      "jueves",
      "viernes",
      "sábado"
    ],
    months:         [
      "enero",
      "febrero",
      "marzo",
      "abril",
      "mayo",
      "junio",
      "julio",
      "agosto",
      "septiembre",
      "octubre",
      "noviembre",
      "diciembre"
    ],
    order:
      DayLabelOrder::DayFirstWithDe,
    controls:       ControlLabels {
      prev:   "Anterior",
      today:  "Hoy",
      next:   "Siguiente",
      views:  ["Día", "Semana", "Mes", "Año"],
      events: "eventos"
    }
  };

const PORTUGUESE: CalendarLocale =
  CalendarLocale {
    key:            "pt",
    weekdays_short: [
      "dom", "seg", "ter", "qua", "qui",
      "sex", "sáb"
    ],
    weekdays_long:  [
      "domingo",
      "segunda-feira",
      "terça-feira",
      "quarta-feira",
      "quinta-feira",
      "sexta-feira",
      "sábado"
    ],
    months:         [
      "janeiro",
      "fevereiro",
      "março",
      "abril",
      "maio",
      "junho",
      "julho",
      "agosto",
      "setembro",
      "outubro",
      "novembro",
      "dezembro"
    ],
    order:
      DayLabelOrder::DayFirstWithDe,
    controls:       ControlLabels {
      prev:   "Anterior",
      today:  "Hoje",
      next:   "Próximo",
      views:  ["Dia", "Semana", "Mês", "Ano"],
      events: "eventos"
    }
  };

const FRENCH: CalendarLocale =
  CalendarLocale {
    key:            "fr",
    weekdays_short: [
      "dim.", "lun.", "mar.", "mer.",
      "jeu.", "ven.", "sam."
    ],
    weekdays_long:  [
      "dimanche",
      "lundi",
      "mardi",
      "mercredi",
      "jeudi",
      "vendredi",
      "samedi"
    ],
    months:         [
      "janvier",
      "février",
      "mars",
      "avril",
      "mai",
      "juin",
      "juillet",
      "août",
      "septembre",
      "octobre",
      "novembre",
      "décembre"
    ],
    order:          DayLabelOrder::DayFirst,
    controls:       ControlLabels {
      prev:   "Précédent",
      today:  "Aujourd'hui",
      next:   "Suivant",
      views:  [
        "Jour", "Semaine", "Mois", "Année"
      ],
      events: "événements"
    }
  };

impl CalendarLocale {
  pub const fn english() -> Self {
    ENGLISH
  }

  pub fn all() -> [Self; 4] {
    [ENGLISH, SPANISH, PORTUGUESE, FRENCH]
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    let normalized =
      key.trim().to_ascii_lowercase();
    // Accept region-qualified tags such as `pt-BR` or `es_MX`.
    let language = normalized
      .split(['-', '_'])
      .next()
      .unwrap_or_default();
    Self::all()
      .into_iter()
      .find(|locale| locale.key == language)
  }

  pub fn key(&self) -> &'static str {
    self.key
  }

  pub fn weekday_short(
    &self,
    day: NaiveDate
  ) -> &'static str {
    self.weekdays_short[day
      .weekday()
      .num_days_from_sunday()
      as usize]
  }

  pub fn weekday_long(
    &self,
    day: NaiveDate
  ) -> &'static str {
    self.weekdays_long[day
      .weekday()
      .num_days_from_sunday()
      as usize]
  }

  pub fn month_name(
    &self,
    month: u32
  ) -> &'static str {
    let index = month
      .clamp(1, 12)
      .saturating_sub(1)
      as usize;
    self.months[index]
  }

  pub fn prev_label(&self) -> &'static str {
    self.controls.prev
  }

  pub fn today_label(
    &self
  ) -> &'static str {
    self.controls.today
  }

  pub fn next_label(&self) -> &'static str {
    self.controls.next
  }

  pub fn view_label(
    &self,
    view: CalendarView
  ) -> &'static str {
    let index = match view {
      | CalendarView::Day => 0,
      | CalendarView::Week => 1,
      | CalendarView::Month => 2,
      | CalendarView::Year => 3
    };
    self.controls.views[index]
  }

  /// `3 events`, `3 eventos`.
  pub fn event_count(
    &self,
    count: usize
  ) -> String {
    format!("{count} {}", self.controls.events)
  }

  /// Full date, used by the day-view label.
  pub fn format_day(
    &self,
    day: NaiveDate
  ) -> String {
    let weekday = self.weekday_long(day);
    let month = self.month_name(day.month());
    match self.order {
      | DayLabelOrder::MonthFirst => {
        format!(
          "{weekday}, {month} {}, {}",
          day.day(),
          day.year()
        )
      }
      | DayLabelOrder::DayFirstWithDe => {
        format!(
          "{weekday}, {} de {month} de {}",
          day.day(),
          day.year()
        )
      }
      | DayLabelOrder::DayFirst => {
        format!(
          "{weekday} {} {month} {}",
          day.day(),
          day.year()
        )
      }
    }
  }

  /// Month and year, used by every other view label.
  pub fn format_month(
    &self,
    day: NaiveDate
  ) -> String {
    let month = self.month_name(day.month());
    match self.order {
      | DayLabelOrder::DayFirstWithDe => {
        format!("{month} de {}", day.year())
      }
      | DayLabelOrder::MonthFirst
      | DayLabelOrder::DayFirst => {
        format!("{month} {}", day.year())
      }
    }
  }
}

impl Default for CalendarLocale {
  fn default() -> Self {
    ENGLISH
  }
}

/// Abbreviated weekday names starting Sunday.
pub fn weekday_labels(
  locale: &CalendarLocale
) -> [&'static str; 7] {
  locale.weekdays_short
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn march_11() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 11)
      .expect("valid date")
  }

  #[test]
  fn weekday_labels_start_on_sunday_in_every_locale()
  {
    let sunday =
      NaiveDate::from_ymd_opt(2024, 3, 10)
        .expect("valid date");
    for locale in CalendarLocale::all() {
      let labels = weekday_labels(&locale);
      assert_eq!(
        labels[0],
        locale.weekday_short(sunday)
      );
    }
    assert_eq!(
      weekday_labels(
        &CalendarLocale::english()
      ),
      [
        "Sun", "Mon", "Tue", "Wed", "Thu",
        "Fri", "Sat"
      ]
    );
  }

  #[test]
  fn formats_day_and_month_labels() {
    let en = CalendarLocale::english();
    assert_eq!(
      en.format_day(march_11()),
      "Monday, March 11, 2024"
    );
    assert_eq!(
      en.format_month(march_11()),
      "March 2024"
    );

    let es = CalendarLocale::from_key("es")
      .expect("spanish locale");
    assert_eq!(
      es.format_day(march_11()),
      "lunes, 11 de marzo de 2024"
    );
    assert_eq!(
      es.format_month(march_11()),
      "marzo de 2024"
    );

    let fr = CalendarLocale::from_key("fr")
      .expect("french locale");
    assert_eq!(
      fr.format_day(march_11()),
      "lundi 11 mars 2024"
    );
  }

  #[test]
  fn control_labels_follow_the_locale() {
    let en = CalendarLocale::english();
    assert_eq!(en.today_label(), "Today");
    assert_eq!(
      en.view_label(CalendarView::Week),
      "Week"
    );
    assert_eq!(en.event_count(2), "2 events");

    let pt = CalendarLocale::from_key("pt")
      .expect("portuguese locale");
    assert_eq!(pt.prev_label(), "Anterior");
    assert_eq!(pt.next_label(), "Próximo");
    assert_eq!(
      pt.view_label(CalendarView::Month),
      "Mês"
    );

    for locale in CalendarLocale::all() {
      let labels = CalendarView::all()
        .map(|view| locale.view_label(view));
      assert!(
        labels
          .iter()
          .all(|label| !label.is_empty()),
        "{} view labels",
        locale.key()
      );
    }
  }

  #[test]
  fn from_key_accepts_region_tags() {
    assert_eq!(
      CalendarLocale::from_key("pt-BR")
        .map(|locale| locale.key()),
      Some("pt")
    );
    assert_eq!(
      CalendarLocale::from_key("es_MX")
        .map(|locale| locale.key()),
      Some("es")
    );
    assert!(
      CalendarLocale::from_key("de")
        .is_none()
    );
  }
}
