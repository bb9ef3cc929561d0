use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use std::fmt::Display;
use std::path::PathBuf;
use userchart::axis::{DEFAULT_TICK_COUNT, local_noon};
use userchart::readout::readout;
use userchart::{ChartConfig, ChartState, Dataset, DateRange, viz, x_axis_date_values};

#[derive(Parser, Debug)]
#[command(
    name = "userchart",
    version,
    about = "Render and inspect the stacked user-type chart"
)]
struct Cli {
    /// Use UTC for calendar days instead of the local time zone.
    #[arg(long, global = true, default_value_t = false)]
    utc: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the chart (optionally zoomed and with a selected row) to .svg or .png.
    Render(RenderArgs),
    /// Print the x-axis tick dates.
    Ticks(TicksArgs),
    /// Print the window produced by one zoom gesture over the full range.
    Zoom(ZoomArgs),
    /// Print the readout for the row nearest to a date.
    Nearest {
        /// YYYY-MM-DD (noon) or Unix epoch seconds
        date: String,
    },
    /// Print every row of the dataset.
    Rows,
}

#[derive(Args, Debug)]
struct ZoomArgs {
    /// Horizontal gesture position, 0 = left edge, 1 = right edge.
    #[arg(long, default_value_t = 0.5)]
    anchor: f64,
    /// Pinch magnification (> 1 zooms in).
    #[arg(long)]
    magnification: f64,
}

#[derive(Args, Debug)]
struct TicksArgs {
    /// Desired number of ticks.
    #[arg(long, default_value_t = DEFAULT_TICK_COUNT)]
    count: usize,
    /// Range start (YYYY-MM-DD or epoch seconds). Defaults to the first sample.
    #[arg(long)]
    from: Option<String>,
    /// Range end (YYYY-MM-DD or epoch seconds). Defaults to the last sample.
    #[arg(long)]
    to: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output path (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// JSON chart config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Desired number of x-axis ticks.
    #[arg(long)]
    ticks: Option<usize>,
    /// Locale for number formatting (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Zoom anchor, 0 = left edge, 1 = right edge.
    #[arg(long, default_value_t = 0.5)]
    anchor: f64,
    /// Zoom magnification; omit to show the full range.
    #[arg(long)]
    magnification: Option<f64>,
    /// Highlight the row nearest to this date (YYYY-MM-DD or epoch seconds).
    #[arg(long)]
    select: Option<String>,
}

fn parse_date<Tz: TimeZone>(s: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return DateTime::from_timestamp(secs, 0);
    }
    let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    local_noon(day, tz).map(|d| d.with_timezone(&Utc))
}

fn parse_date_arg<Tz: TimeZone>(s: &str, tz: &Tz, flag: &str) -> Result<DateTime<Utc>> {
    parse_date(s, tz)
        .ok_or_else(|| anyhow!("invalid {flag}, expected YYYY-MM-DD or epoch seconds: {s}"))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    if cli.utc {
        run(cli.cmd, &Utc)
    } else {
        run(cli.cmd, &Local)
    }
}

fn run<Tz>(cmd: Command, tz: &Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let data = Dataset::load_embedded().context("loading embedded dataset")?;
    let mut state =
        ChartState::for_dataset(&data).ok_or_else(|| anyhow!("embedded dataset is empty"))?;

    match cmd {
        Command::Render(args) => cmd_render(args, &data, &mut state, tz),
        Command::Ticks(args) => {
            let total = state.total();
            let start = match &args.from {
                Some(s) => parse_date_arg(s, tz, "--from")?,
                None => total.start(),
            };
            let end = match &args.to {
                Some(s) => parse_date_arg(s, tz, "--to")?,
                None => total.end(),
            };
            let range = DateRange::new(start, end)?;
            for t in x_axis_date_values(args.count, Some(&range), tz) {
                println!("{}", t.to_rfc3339());
            }
            Ok(())
        }
        Command::Zoom(args) => {
            let w = state.update_zoom(args.anchor, args.magnification);
            state.end_zoom();
            println!(
                "{} .. {}",
                w.start().with_timezone(tz).to_rfc3339(),
                w.end().with_timezone(tz).to_rfc3339()
            );
            Ok(())
        }
        Command::Nearest { date } => {
            let at = parse_date_arg(&date, tz, "date")?;
            state.begin_drag();
            let row = state
                .drag_to(&data, at)
                .ok_or_else(|| anyhow!("no rows to select from"))?;
            println!("{}", readout(row, tz, &ChartConfig::default().locale));
            state.end_drag();
            Ok(())
        }
        Command::Rows => {
            println!("sample_date,total_users,active_users,new_users");
            for r in data.rows() {
                println!(
                    "{},{},{},{}",
                    r.sample_date.with_timezone(tz).to_rfc3339(),
                    r.total_users,
                    r.active_users(),
                    r.new_users
                );
            }
            Ok(())
        }
    }
}

fn cmd_render<Tz>(args: RenderArgs, data: &Dataset, state: &mut ChartState, tz: &Tz) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    if let Some(title) = args.title {
        config.title = title;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(ticks) = args.ticks {
        config.tick_count = ticks;
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }

    if let Some(mag) = args.magnification {
        state.update_zoom(args.anchor, mag);
        state.end_zoom();
    }
    if let Some(s) = &args.select {
        let at = parse_date_arg(s, tz, "--select")?;
        state.begin_drag();
        state.drag_to(data, at);
    }

    viz::plot_usage(data, state, &args.out, &config, tz)?;
    eprintln!("Wrote chart to {}", args.out.display());
    Ok(())
}
