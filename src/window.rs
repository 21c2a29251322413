use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{Error, Result};

/// Inclusive instant pair bounding one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl TimeWindow {
    /// Builds the `[Jan 1 00:00:00Z, Dec 31 23:59:59Z]` window for `year`.
    pub fn for_year(year: i32) -> Result<Self> {
        let since = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .ok_or(Error::InvalidYear(year))?;
        let until = Utc
            .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
            .single()
            .ok_or(Error::InvalidYear(year))?;

        Ok(Self { since, until })
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.since && instant <= self.until
    }

    pub fn since_rfc3339(&self) -> String {
        self.since.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn until_rfc3339(&self) -> String {
        self.until.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_window_bounds() {
        let window = TimeWindow::for_year(2024).unwrap();
        assert_eq!(window.since_rfc3339(), "2024-01-01T00:00:00Z");
        assert_eq!(window.until_rfc3339(), "2024-12-31T23:59:59Z");
        assert!(window.since <= window.until);
    }

    #[test]
    fn test_containment_is_inclusive() {
        let window = TimeWindow::for_year(2024).unwrap();
        assert!(window.contains(window.since));
        assert!(window.contains(window.until));
        assert!(!window.contains(window.since - Duration::seconds(1)));
        assert!(!window.contains(window.until + Duration::seconds(1)));
    }

    #[test]
    fn test_unrepresentable_year() {
        assert!(matches!(
            TimeWindow::for_year(i32::MAX),
            Err(Error::InvalidYear(_))
        ));
    }
}
