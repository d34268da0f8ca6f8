use std::io::Write;

use almanac_core::grid::week_dates;
use almanac_core::layout::events_on_day;
use almanac_core::views::{
    DayLayout, HourRow, MonthLayout, WeekLayout, format_start_time, format_time_range,
};
use almanac_core::{CalendarEvent, CalendarLocale, CalendarState, EventColor, ViewLayout};
use chrono::Datelike;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const MONTH_CELL_WIDTH: usize = 16;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    locale: CalendarLocale,
}

impl Renderer {
    pub fn new(color: bool, locale: CalendarLocale) -> Self {
        Self { color, locale }
    }

    #[tracing::instrument(skip_all)]
    pub fn write_layout<W: Write>(
        &self,
        out: &mut W,
        title: &str,
        layout: &ViewLayout,
    ) -> anyhow::Result<()> {
        writeln!(out, "{title}")?;
        writeln!(out)?;
        match layout {
            ViewLayout::Day(day) => self.write_day(out, day),
            ViewLayout::Week(week) => self.write_week(out, week),
            ViewLayout::Month(month) => self.write_month(out, month),
            ViewLayout::Reserved(view) => {
                writeln!(out, "{view} view is not rendered")?;
                Ok(())
            }
        }
    }

    fn write_day<W: Write>(&self, out: &mut W, day: &DayLayout) -> anyhow::Result<()> {
        let now_row = now_row_index(day.now_line, day.rows.len());
        let mut rows = Vec::with_capacity(day.rows.len() + 1);

        for (idx, row) in day.rows.iter().enumerate() {
            let entries = row
                .events
                .iter()
                .map(|placed| {
                    format!(
                        "{} {}",
                        format_time_range(&placed.event),
                        self.paint_event(&placed.event)
                    )
                })
                .collect::<Vec<_>>()
                .join("; ");
            rows.push(vec![row.label(), entries]);

            if now_row == Some(idx) {
                rows.push(vec![String::new(), self.paint("-- now --", "31")]);
            }
        }

        write_table(
            &mut *out,
            vec![String::new(), self.locale.event_count(day.event_count)],
            rows,
        )?;
        Ok(())
    }

    fn write_week<W: Write>(&self, out: &mut W, week: &WeekLayout) -> anyhow::Result<()> {
        let mut headers = vec![String::new()];
        for column in &week.columns {
            let label = format!(
                "{} {} ({})",
                column.weekday_label,
                column.date.day(),
                column.event_count
            );
            headers.push(if column.is_today {
                self.paint(&format!("*{label}"), "1")
            } else {
                label
            });
        }

        let row_count = week.hour_labels.len();
        let now = week
            .now_line
            .as_ref()
            .and_then(|line| now_row_index(Some(line.percent), row_count).map(|row| (line.column, row)));

        let mut rows = Vec::with_capacity(row_count);
        for (idx, label) in week.hour_labels.iter().enumerate() {
            let mut cells = vec![label.clone()];
            for (column_idx, column) in week.columns.iter().enumerate() {
                let mut cell = column
                    .rows
                    .get(idx)
                    .map(|row| self.row_names(row))
                    .unwrap_or_default();
                if now == Some((column_idx, idx)) {
                    cell = format!("{} {cell}", self.paint(">", "31"));
                }
                cells.push(truncate_to_width(&cell, MONTH_CELL_WIDTH));
            }
            rows.push(cells);
        }

        write_table(&mut *out, headers, rows)?;
        Ok(())
    }

    fn write_month<W: Write>(&self, out: &mut W, month: &MonthLayout) -> anyhow::Result<()> {
        let headers = month
            .weekday_labels
            .iter()
            .map(|label| label.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (week_idx, week) in month.cells.chunks(7).enumerate() {
            if week_idx > 0 {
                rows.push(vec![String::new(); 7]);
            }

            let columns = week
                .iter()
                .map(|cell| {
                    let mut lines = Vec::new();
                    let day = if cell.is_today {
                        self.paint(&format!("[{}]", cell.date.day()), "1")
                    } else if !cell.in_month {
                        self.paint(&format!("({})", cell.date.day()), "2")
                    } else {
                        cell.date.day().to_string()
                    };
                    lines.push(day);
                    for event in &cell.events {
                        let text = format!("{} {}", format_start_time(event), event.name);
                        lines.push(self.paint(
                            &truncate_to_width(&text, MONTH_CELL_WIDTH),
                            color_code(event.color),
                        ));
                    }
                    lines
                })
                .collect::<Vec<_>>();

            let height = columns.iter().map(Vec::len).max().unwrap_or(1);
            for line in 0..height {
                rows.push(
                    columns
                        .iter()
                        .map(|lines| lines.get(line).cloned().unwrap_or_default())
                        .collect(),
                );
            }
        }

        write_table(&mut *out, headers, rows)?;
        Ok(())
    }

    /// Every event starting in the cursor's week, ordered by start.
    #[tracing::instrument(skip_all)]
    pub fn write_agenda<W: Write>(&self, out: &mut W, state: &CalendarState) -> anyhow::Result<()> {
        let locale = state.locale();
        writeln!(out, "{}", state.date_label())?;
        writeln!(out)?;

        let mut rows = Vec::new();
        for day in week_dates(state.date().date()) {
            let mut events = events_on_day(state.events(), day);
            events.sort_by_key(|event| event.start);
            for event in events {
                rows.push(vec![
                    format!("{} {}", locale.weekday_short(day), day.format("%Y-%m-%d")),
                    format_time_range(event),
                    self.paint_event(event),
                ]);
            }
        }

        if rows.is_empty() {
            writeln!(out, "No events this week.")?;
            return Ok(());
        }

        write_table(
            &mut *out,
            vec!["Day".to_string(), "Time".to_string(), "Event".to_string()],
            rows,
        )?;
        Ok(())
    }

    fn row_names(&self, row: &HourRow) -> String {
        row.events
            .iter()
            .map(|placed| self.paint_event(&placed.event))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn paint_event(&self, event: &CalendarEvent) -> String {
        self.paint(&event.name, color_code(event.color))
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn color_code(color: EventColor) -> &'static str {
    match color {
        EventColor::Default => "0",
        EventColor::Blue => "34",
        EventColor::Green => "32",
        EventColor::Pink => "95",
        EventColor::Purple => "35",
        EventColor::Indigo => "94",
    }
}

/// Maps a now-line percentage onto the row it falls in.
fn now_row_index(percent: Option<f64>, rows: usize) -> Option<usize> {
    let percent = percent?;
    if rows == 0 || !(0.0..100.0).contains(&percent) {
        return None;
    }
    Some(((percent / 100.0) * rows as f64).floor() as usize)
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(strip_ansi(text).as_str()) <= max {
        return text.to_string();
    }

    let plain = strip_ansi(text);
    let mut out = String::with_capacity(max);
    let mut used = 0;
    for ch in plain.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width + 1 > max {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push('…');
    out
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(header).as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for (idx, header) in headers.iter().enumerate() {
        write_padded(&mut writer, header, widths[idx])?;
    }
    writeln!(writer)?;

    for width in &widths {
        write!(writer, "{:-<width$} ", "", width = width)?;
    }
    writeln!(writer)?;

    for row in rows {
        for (idx, width) in widths.iter().enumerate() {
            let cell = row.get(idx).map(String::as_str).unwrap_or_default();
            write_padded(&mut writer, cell, *width)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn write_padded<W: Write>(writer: &mut W, cell: &str, width: usize) -> anyhow::Result<()> {
    let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
    let padding = width.saturating_sub(visible_width);
    write!(writer, "{}{} ", cell, " ".repeat(padding))?;
    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
