use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use clap::Args;
use tracing::info;

use daka_core::{status_label, CheckinDialog, Config, DayKey, ToggleOutcome};

use super::{open_app, parse_date};

#[derive(Args)]
pub struct ToggleArgs {
    /// Day to toggle (YYYY-MM-DD); defaults to today
    #[arg(value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[derive(Args)]
pub struct StatusArgs {
    /// Day to look up (YYYY-MM-DD); defaults to today
    #[arg(value_parser = parse_date)]
    date: Option<NaiveDate>,
}

fn confirmed(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub fn run(args: ToggleArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut app = open_app()?;
    let date = args.date.unwrap_or(today);
    let key = DayKey::from(date);

    let mut dialog = CheckinDialog::new();
    dialog.open(date);

    if config.interaction.confirm_toggle && !args.yes && date <= today {
        println!("项目: {}", app.active_project().name);
        println!("日期: {key}");
        println!("当前状态: {}", dialog.status(&app).unwrap_or_default());
        if !confirmed("确认?")? {
            dialog.cancel();
            println!("Cancelled");
            return Ok(());
        }
    }

    match dialog.confirm(&mut app, today)? {
        Some(ToggleOutcome::Checked) => {
            info!(%key, project = %app.active_project().id, "checked in");
            println!("{key} {}", status_label(true));
        }
        Some(ToggleOutcome::Unchecked) => {
            info!(%key, project = %app.active_project().id, "check-in removed");
            println!("{key} {}", status_label(false));
        }
        Some(ToggleOutcome::RejectedFuture) => println!("{key} is in the future; nothing changed"),
        None => {}
    }
    Ok(())
}

pub fn status(args: StatusArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app()?;
    let date = args.date.unwrap_or(today);
    println!("{} {}", DayKey::from(date), status_label(app.is_checked(date)));
    Ok(())
}
