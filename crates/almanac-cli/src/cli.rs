use std::ffi::OsString;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use almanac_core::event::parse_events_json;
use almanac_core::views::{ViewContext, build_view_layout};
use almanac_core::{
    CalendarConfig, CalendarDefaults, CalendarLocale, CalendarState, CalendarView, ViewportClass,
};
use anyhow::{Context, anyhow};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::render::Renderer;

const CONFIG_ENV_VAR: &str = "ALMANAC_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputView {
    Day,
    Week,
    Month,
    Year,
    Agenda,
}

impl OutputView {
    fn calendar_view(self) -> CalendarView {
        match self {
            Self::Day => CalendarView::Day,
            Self::Week | Self::Agenda => CalendarView::Week,
            Self::Month => CalendarView::Month,
            Self::Year => CalendarView::Year,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "almanac",
    version,
    about = "Render calendar events as day, week or month grids"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Calendar config TOML.
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Locale key such as `en`, `es` or `pt-BR`.
    #[arg(long = "locale")]
    pub locale: Option<String>,

    /// Navigation cursor (YYYY-MM-DD); defaults to today.
    #[arg(long = "date", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Current time used for today marks and the now line (YYYY-MM-DDTHH:MM).
    #[arg(long = "now", value_parser = parse_instant)]
    pub now: Option<NaiveDateTime>,

    /// Lay out as a narrow viewport (forces the day view).
    #[arg(long = "narrow")]
    pub narrow: bool,

    #[arg(long = "no-color")]
    pub no_color: bool,

    /// JSON array of events.
    pub events: PathBuf,

    pub view: Option<OutputView>,
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow!("expected YYYY-MM-DD, got {raw}: {e}"))
}

fn parse_instant(raw: &str) -> anyhow::Result<NaiveDateTime> {
    almanac_core::event::wall_clock_serde::parse(raw.trim()).map_err(|e| anyhow!(e))
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = GlobalCli::parse_from(raw_args);
    init_tracing(cli.verbose, cli.quiet)?;

    info!(
        events = %cli.events.display(),
        view = ?cli.view,
        narrow = cli.narrow,
        "starting almanac CLI"
    );

    let config = load_config(cli.config.as_deref())?;
    let locale = match cli.locale.as_deref() {
        Some(key) => CalendarLocale::from_key(key)
            .ok_or_else(|| anyhow!("unsupported locale: {key}"))?,
        None => config.calendar_locale(),
    };

    let raw = fs::read_to_string(&cli.events)
        .with_context(|| format!("failed to read {}", cli.events.display()))?;
    let events = parse_events_json(&raw)
        .with_context(|| format!("invalid events file {}", cli.events.display()))?;

    let now = cli
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    let output = cli.view.unwrap_or(match config.default_view() {
        CalendarView::Day => OutputView::Day,
        CalendarView::Week => OutputView::Week,
        CalendarView::Month => OutputView::Month,
        CalendarView::Year => OutputView::Year,
    });
    let viewport = if cli.narrow {
        ViewportClass::Narrow
    } else {
        ViewportClass::Wide
    };

    let state = CalendarState::new(
        CalendarDefaults {
            date: cli.date.map(|date| date.and_time(chrono::NaiveTime::MIN)),
            view: Some(output.calendar_view()),
            events,
            locale,
            enable_hotkeys: false,
        },
        now,
        viewport,
        None,
    );

    let output = if state.view() != output.calendar_view() {
        warn!(
            requested = ?output,
            view = %state.view(),
            "narrow layout forced the day view"
        );
        OutputView::Day
    } else {
        output
    };

    let ctx = ViewContext::from_state(
        &state,
        now,
        config.visible_hours(viewport),
    );
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let renderer = Renderer::new(color, state.locale());
    let mut out = std::io::stdout().lock();

    if output == OutputView::Agenda {
        renderer.write_agenda(&mut out, &state)?;
    } else {
        renderer.write_layout(&mut out, &state.date_label(), &build_view_layout(&ctx))?;
    }

    info!("done");
    Ok(())
}

#[tracing::instrument(skip(override_path))]
fn load_config(override_path: Option<&Path>) -> anyhow::Result<CalendarConfig> {
    match resolve_config_path(override_path) {
        Some(path) => {
            info!(config = %path.display(), "loading calendar config");
            CalendarConfig::load_from_path(&path)
        }
        None => {
            debug!("no calendar config found; using defaults");
            Ok(CalendarConfig::default())
        }
    }
}

fn resolve_config_path(override_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path.to_path_buf());
    }

    if let Ok(raw) = std::env::var(CONFIG_ENV_VAR) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("almanac").join("calendar.toml"))
        .filter(|candidate| candidate.exists())
}
