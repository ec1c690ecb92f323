use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use yeargrid::calendar::{days_in_month, is_month_in_range};
use yeargrid::services::{
    CalendarDelegate, ConfigService, MonthDataMap, NoMonthData, SharedLookup, YearGridController,
};
use yeargrid::tui::app::{self, App};
use yeargrid::tui::theme::Theme;
use yeargrid::types::{MonthCell, YearMonth};

/// Year-at-a-glance month picker
#[derive(Parser)]
#[command(name = "yeargrid")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.yeargrid/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive year grid (default)
    Tui {
        /// Year to open (default: year of the selected month)
        #[arg(long)]
        year: Option<i32>,

        /// JSON file of months with data, e.g. {"2024": [1, 3]}
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Print the twelve month cells of a year
    Show {
        /// Year to show (default: year of the selected month)
        #[arg(long)]
        year: Option<i32>,

        /// JSON file of months with data
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a month can be selected
    Check {
        #[arg(long)]
        year: i32,

        #[arg(long)]
        month: u32,
    },

    /// Print the resolved configuration
    Config {
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config_service = match self.config {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new()?,
        };

        match self.command {
            None => run_tui(&config_service, None, None),
            Some(Commands::Tui { year, data }) => run_tui(&config_service, year, data.as_deref()),
            Some(Commands::Show { year, data, json }) => {
                let delegate = config_service.load()?.into_delegate()?;
                let lookup = load_lookup(data.as_deref())?;
                println!("{}", year_report(delegate, lookup, year, json)?);
                Ok(())
            }
            Some(Commands::Check { year, month }) => {
                let delegate = config_service.load()?.into_delegate()?;
                println!("{}", check_report(&delegate, year, month)?);
                Ok(())
            }
            Some(Commands::Config { init }) => run_config(&config_service, init),
        }
    }
}

fn run_tui(
    config_service: &ConfigService,
    year: Option<i32>,
    data: Option<&Path>,
) -> anyhow::Result<()> {
    let delegate = config_service.load()?.into_delegate()?;
    let year = year.unwrap_or(delegate.selected().year);
    let lookup = load_lookup(data)?;
    let app = App::new(delegate.into_shared(), lookup, year, Theme::detect())?;
    app::run(app)
}

fn run_config(config_service: &ConfigService, init: bool) -> anyhow::Result<()> {
    let path = config_service.path();
    if init {
        if path.exists() {
            eprintln!("Config already exists at {}", path.display());
        } else {
            config_service.save(&Default::default())?;
            eprintln!("Wrote default config to {}", path.display());
        }
    }
    let config = config_service.load()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Month data from `path`, or a lookup that reports no data at all
fn load_lookup(path: Option<&Path>) -> anyhow::Result<SharedLookup> {
    match path {
        Some(path) => {
            let map = MonthDataMap::load(path)
                .with_context(|| format!("Failed to load month data from {}", path.display()))?;
            Ok(SharedLookup::new(map))
        }
        None => Ok(SharedLookup::new(NoMonthData)),
    }
}

#[derive(Serialize)]
struct YearReport<'a> {
    year: i32,
    week_start: String,
    min: YearMonth,
    max: YearMonth,
    cells: &'a [MonthCell],
}

fn year_report(
    delegate: CalendarDelegate,
    lookup: SharedLookup,
    year: Option<i32>,
    json: bool,
) -> anyhow::Result<String> {
    let year = year.unwrap_or(delegate.selected().year);
    let (min, max, week_start) = (delegate.min(), delegate.max(), delegate.week_start());

    let mut controller = YearGridController::new(delegate.into_shared(), lookup);
    controller.init(year)?;
    let cells = controller.cells()?;

    if json {
        let report = YearReport {
            year,
            week_start: week_start.to_string(),
            min,
            max,
            cells,
        };
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut lines = vec![format!(
        "{} (week starts {}, selectable {}..{})",
        year, week_start, min, max
    )];
    for cell in cells {
        let mut tags = Vec::new();
        if cell.is_selected {
            tags.push("selected");
        }
        if cell.has_data {
            tags.push("data");
        }
        if !cell.year_month().is_within(min, max) {
            tags.push("out of range");
        }
        lines.push(format!(
            "{}  {:>2} days  offset {}  {}",
            cell.year_month(),
            cell.day_count,
            cell.leading_offset,
            tags.join(", ")
        ));
    }
    Ok(lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n"))
}

fn check_report(delegate: &CalendarDelegate, year: i32, month: u32) -> anyhow::Result<String> {
    days_in_month(year, month)?;
    let (min, max) = (delegate.min(), delegate.max());
    let month_id = YearMonth::new(year, month);
    if is_month_in_range(year, month, min.year, min.month, max.year, max.month) {
        Ok(format!("{} is selectable", month_id))
    } else {
        Ok(format!("{} is outside {}..{}", month_id, min, max))
    }
}
