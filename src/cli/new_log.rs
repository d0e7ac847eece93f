use std::fmt::Display;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::storage::entities::{Category, NewWorkLog};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(long, short = 'H', value_parser = parse_hours, help = "Hours worked, for example 1.5")]
    hours: f64,
    #[arg(long, short, help = "Brief description of work done")]
    description: String,
    #[arg(long, short, value_enum, default_value_t = Category::Development)]
    category: Category,
    #[arg(
        long,
        help = "Day the work was done on. Examples are \"yesterday\", \"friday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

fn parse_hours(value: &str) -> Result<f64, String> {
    let hours = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("{value} is not a number: {e}"))?;
    if hours.is_finite() && hours >= 0. {
        Ok(hours)
    } else {
        Err(format!("Hours can't be {value}"))
    }
}

/// Turns the `log` command into a creation request. Both hours and description are required,
/// everything else has a default. Relative dates like "yesterday" are counted from `today`.
pub fn parse_new_log(
    LogCommand {
        hours,
        description,
        category,
        date,
        date_style,
    }: LogCommand,
    today: NaiveDate,
) -> Result<NewWorkLog> {
    if description.trim().is_empty() {
        return Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                "Description can't be empty",
            )
            .into());
    }

    let date = match date {
        Some(date) => match parse_date_string(
            &date,
            today.and_time(NaiveTime::MIN).and_utc(),
            date_style.into(),
        ) {
            Ok(v) => v.date_naive(),
            Err(e) => {
                return Err(Args::command()
                    .error(
                        clap::error::ErrorKind::ValueValidation,
                        format!("Failed to validate date {e}"),
                    )
                    .into());
            }
        },
        None => today,
    };

    Ok(NewWorkLog {
        date,
        hours,
        category,
        description,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::Parser;

    use crate::storage::entities::Category;

    use super::{parse_hours, parse_new_log, LogCommand};

    fn command(args: &[&str]) -> LogCommand {
        LogCommand::try_parse_from(std::iter::once("log").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_hours() {
        assert_eq!(parse_hours("1.5"), Ok(1.5));
        assert_eq!(parse_hours("0"), Ok(0.));
        assert!(parse_hours("-2").is_err());
        assert!(parse_hours("NaN").is_err());
        assert!(parse_hours("plenty").is_err());
    }

    #[test]
    fn test_defaults() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let log = parse_new_log(command(&["-H", "2", "-d", "code review"]), today).unwrap();

        assert_eq!(log.date, today);
        assert_eq!(log.hours, 2.);
        assert_eq!(log.category, Category::Development);
        assert_eq!(log.description, "code review");
    }

    #[test]
    fn test_explicit_date_and_category() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let log = parse_new_log(
            command(&[
                "--hours",
                "1",
                "--description",
                "sync",
                "--category",
                "meetings",
                "--date",
                "04/03/2024",
            ]),
            today,
        )
        .unwrap();

        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(log.category, Category::Meetings);
    }

    #[test]
    fn test_relative_date_counts_from_today() {
        let today = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();

        let log = parse_new_log(
            command(&["-H", "1", "-d", "sync", "--date", "yesterday"]),
            today,
        )
        .unwrap();

        assert_eq!(log.date, NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
    }

    #[test]
    fn test_us_date_style() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        let log = parse_new_log(
            command(&[
                "-H",
                "1",
                "-d",
                "sync",
                "--date",
                "04/03/2024",
                "--date-style",
                "us",
            ]),
            today,
        )
        .unwrap();

        assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
    }

    #[test]
    fn test_required_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();

        assert!(parse_new_log(command(&["-H", "2", "-d", "  "]), today).is_err());
        assert!(LogCommand::try_parse_from(["log", "-d", "no hours"]).is_err());
        assert!(LogCommand::try_parse_from(["log", "-H", "1"]).is_err());
        assert!(parse_new_log(
            command(&["-H", "2", "-d", "x", "--date", "someday maybe"]),
            today
        )
        .is_err());
    }
}
