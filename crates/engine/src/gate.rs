use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;

use common::{Error, Result};

/// Skips whole runs on Saturdays and Sundays in a given time zone.
#[derive(Debug, Clone, Copy)]
pub struct WeekendGate {
    tz: Tz,
    enabled: bool,
}

impl WeekendGate {
    /// `tz_name` is an IANA zone such as `"Europe/Vilnius"`.
    pub fn new(tz_name: &str, enabled: bool) -> Result<Self> {
        let tz: Tz = tz_name
            .parse()
            .map_err(|_| Error::Config(format!("unknown time zone '{tz_name}'")))?;
        Ok(Self { tz, enabled })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Whether a run may proceed right now.
    pub fn is_open(&self) -> bool {
        self.is_open_at(Utc::now())
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        if !self.enabled {
            return true;
        }
        !matches!(now.with_timezone(&self.tz).weekday(), Weekday::Sat | Weekday::Sun)
    }
}
