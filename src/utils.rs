use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clubhub_core::ClubHubError;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Ok(spinner)
}

/// Parse a `--now` argument. A bare date means midnight of that day.
pub fn parse_now(arg: Option<&str>) -> Result<NaiveDateTime> {
    let Some(s) = arg else {
        return Ok(Local::now().naive_local());
    };

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }

    let date = parse_date(s)?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| ClubHubError::InvalidDate(s.to_string()).into())
}

pub fn parse_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => Ok(parse_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ClubHubError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ClubHubError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_from_bare_date_is_midnight() {
        let now = parse_now(Some("2024-06-01")).unwrap();
        assert_eq!(now.to_string(), "2024-06-01 00:00:00");
    }

    #[test]
    fn test_now_with_time() {
        let now = parse_now(Some("2024-06-01T18:30")).unwrap();
        assert_eq!(now.to_string(), "2024-06-01 18:30:00");
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(parse_now(Some("June 1st")).is_err());
        assert!(parse_today(Some("2024-13-01")).is_err());
    }
}
