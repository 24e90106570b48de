use chrono::{Local, NaiveDate};
use clap::Subcommand;
use std::path::Path;

use super::Session;

#[derive(Subcommand)]
pub enum DayAction {
    /// Summarize a day and store it in the calendar data
    Summary {
        /// Date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Print without storing
        #[arg(long)]
        dry_run: bool,
    },
    /// List stored daily records
    List,
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{s}': {e}").into()),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn run(action: DayAction, state: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(state)?;

    match action {
        DayAction::Summary { date, dry_run } => {
            let date = parse_date(date.as_deref())?;
            let summary = if dry_run {
                session.engine.summarize_day(&session.state, date)
            } else {
                let summary = session.engine.record_day(&mut session.state, date);
                session.save()?;
                summary
            };
            session.print(&summary)?;
        }
        DayAction::List => session.print(&session.state.calendar_data)?,
    }
    Ok(())
}
