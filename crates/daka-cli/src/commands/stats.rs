use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use daka_core::{CheckinStats, DayKey, Project};

use super::open_app;

#[derive(Args)]
pub struct StatsArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    project: &'a Project,
    #[serde(flatten)]
    stats: CheckinStats,
    /// Every checked day, oldest first.
    dates: Vec<DayKey>,
}

pub fn run(args: StatsArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;
    let report = StatsReport {
        project: app.active_project(),
        stats: app.stats(today),
        dates: app.checkins().dates(&app.active_project().id).collect(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let most_recent = report
        .stats
        .most_recent
        .map_or_else(|| "暂无".to_string(), |key| key.to_string());
    println!("项目: {}", report.project.name);
    println!("累计打卡: {}", report.stats.total);
    println!("最近打卡: {most_recent}");
    println!("连续天数: {}", report.stats.streak);
    Ok(())
}
