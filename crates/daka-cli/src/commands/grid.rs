use chrono::NaiveDate;
use clap::Args;

use daka_core::Config;

use super::open_app;
use crate::render;

#[derive(Args)]
pub struct GridArgs {
    /// Trailing window in days (defaults to calendar.total_days)
    #[arg(long, allow_negative_numbers = true)]
    days: Option<i64>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: GridArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let app = open_app()?;
    let total_days = args.days.unwrap_or(config.calendar.total_days);
    let grid = app.week_grid(today, total_days);

    let project = app.active_project();
    let checkins = app.checkins();
    if args.json {
        let view = render::GridView::new(project, &grid, checkins);
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", project.name);
        print!("{}", render::heatmap(&grid, checkins, &project.id, &config.display));
    }
    Ok(())
}
