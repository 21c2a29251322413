use chrono::Datelike;
use serde_json::json;

use crate::error::{Error, Result};
use crate::github::response::{CalendarUser, ContributionDay, UserData};
use crate::github::GitHubClient;
use crate::models::{ActivityPattern, Streaks};
use crate::window::TimeWindow;

const CALENDAR_QUERY: &str = r#"
query($login: String!, $since: DateTime!, $until: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $since, to: $until) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Longest streak, longest break, and the run still open on the year's last
/// calendar day.
pub async fn get_streaks(client: &GitHubClient, username: &str, year: i32) -> Result<Streaks> {
    let days = fetch_contribution_days(client, username, year).await?;
    Ok(compute_streaks(&days))
}

/// Contribution totals per weekday across the year's calendar.
pub async fn get_activity_patterns(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<Vec<ActivityPattern>> {
    let days = fetch_contribution_days(client, username, year).await?;
    Ok(weekday_totals(&days))
}

async fn fetch_contribution_days(
    client: &GitHubClient,
    username: &str,
    year: i32,
) -> Result<Vec<ContributionDay>> {
    let window = TimeWindow::for_year(year)?;
    tracing::info!("Fetching contribution calendar for {} ({})", username, year);

    let data: UserData<CalendarUser> = client
        .graphql(
            CALENDAR_QUERY,
            json!({
                "login": username,
                "since": window.since_rfc3339(),
                "until": window.until_rfc3339(),
            }),
        )
        .await?;
    let user = data
        .user
        .ok_or_else(|| Error::UserNotFound(username.to_string()))?;

    Ok(user
        .contributions_collection
        .contribution_calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .collect())
}

/// Single pass over the chronologically ordered calendar: active days grow
/// the streak counter and finalize the break counter, inactive days the
/// reverse. One more max after the loop covers a run still open at the end.
fn compute_streaks(days: &[ContributionDay]) -> Streaks {
    let mut longest_streak = 0;
    let mut current_streak = 0;
    let mut longest_break = 0;
    let mut current_break = 0;

    for day in days {
        if day.contribution_count > 0 {
            current_streak += 1;
            longest_break = longest_break.max(current_break);
            current_break = 0;
        } else {
            current_break += 1;
            longest_streak = longest_streak.max(current_streak);
            current_streak = 0;
        }
    }
    longest_streak = longest_streak.max(current_streak);
    longest_break = longest_break.max(current_break);

    Streaks {
        longest_streak,
        longest_break,
        current_streak,
    }
}

fn weekday_totals(days: &[ContributionDay]) -> Vec<ActivityPattern> {
    let mut totals = [0u32; 7];
    for day in days {
        let idx = day.date.weekday().num_days_from_sunday() as usize;
        totals[idx] += day.contribution_count;
    }

    WEEKDAYS
        .iter()
        .zip(totals)
        .map(|(name, commits)| ActivityPattern {
            day: name.to_string(),
            commits,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn days_from_counts(counts: &[u32]) -> Vec<ContributionDay> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ContributionDay {
                date: start + Duration::days(i as i64),
                contribution_count: count,
            })
            .collect()
    }

    #[test]
    fn test_streak_run_lengths() {
        let days = days_from_counts(&[2, 1, 0, 0, 3, 0, 5, 4, 6]);
        let streaks = compute_streaks(&days);
        assert_eq!(streaks.longest_streak, 3);
        assert_eq!(streaks.longest_break, 2);
        assert_eq!(streaks.current_streak, 3);
    }

    #[test]
    fn test_streak_ending_on_inactive_day() {
        let days = days_from_counts(&[1, 1, 1, 0]);
        let streaks = compute_streaks(&days);
        assert_eq!(streaks.longest_streak, 3);
        assert_eq!(streaks.longest_break, 1);
        assert_eq!(streaks.current_streak, 0);
    }

    #[test]
    fn test_streaks_over_empty_calendar() {
        let streaks = compute_streaks(&[]);
        assert_eq!(streaks.longest_streak, 0);
        assert_eq!(streaks.longest_break, 0);
        assert_eq!(streaks.current_streak, 0);
    }

    #[test]
    fn test_fully_inactive_year() {
        let days = days_from_counts(&[0, 0, 0, 0, 0]);
        let streaks = compute_streaks(&days);
        assert_eq!(streaks.longest_streak, 0);
        assert_eq!(streaks.longest_break, 5);
        assert_eq!(streaks.current_streak, 0);
    }

    #[test]
    fn test_weekday_totals() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday.
        let days = days_from_counts(&[3, 0, 0, 0, 0, 0, 4]);
        let patterns = weekday_totals(&days);
        assert_eq!(patterns.len(), 7);
        assert_eq!(patterns[0].day, "Sunday");
        assert_eq!(patterns[0].commits, 4);
        assert_eq!(patterns[1].day, "Monday");
        assert_eq!(patterns[1].commits, 3);
        assert_eq!(patterns[2].commits, 0);
    }
}
