//! Date/time and uniqueness placeholders
//!
//! Templates may contain the following tokens:
//! - `{year}` - four digit year
//! - `{month}`, `{day}` - zero-padded month and day of month
//! - `{hour}`, `{minute}`, `{second}` - zero-padded 24h time components
//! - `{week}` - zero-padded ISO 8601 week number
//! - `{wday}` - day of week, 0 (Sunday) to 6 (Saturday)
//! - `{timestamp}` - Unix timestamp (seconds)
//! - `{uniqid}` - time-based token with a random suffix
//!
//! Any other `{...}` token is left as is.

use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use tracing::trace;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([a-z]+)\}").unwrap()
});

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// A recognised placeholder token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Week,
    Wday,
    Timestamp,
    Uniqid,
}

impl Placeholder {
    pub const ALL: [Placeholder; 10] = [
        Placeholder::Year,
        Placeholder::Month,
        Placeholder::Day,
        Placeholder::Hour,
        Placeholder::Minute,
        Placeholder::Second,
        Placeholder::Week,
        Placeholder::Wday,
        Placeholder::Timestamp,
        Placeholder::Uniqid,
    ];

    /// Name between the braces
    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Year => "year",
            Placeholder::Month => "month",
            Placeholder::Day => "day",
            Placeholder::Hour => "hour",
            Placeholder::Minute => "minute",
            Placeholder::Second => "second",
            Placeholder::Week => "week",
            Placeholder::Wday => "wday",
            Placeholder::Timestamp => "timestamp",
            Placeholder::Uniqid => "uniqid",
        }
    }

    /// Full token, e.g. `{year}`
    pub fn token(self) -> String {
        format!("{{{}}}", self.name())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Render this placeholder for the instant `now`
    pub fn render(self, now: &DateTime<FixedOffset>) -> String {
        match self {
            Placeholder::Year => format!("{:04}", now.year()),
            Placeholder::Month => format!("{:02}", now.month()),
            Placeholder::Day => format!("{:02}", now.day()),
            Placeholder::Hour => format!("{:02}", now.hour()),
            Placeholder::Minute => format!("{:02}", now.minute()),
            Placeholder::Second => format!("{:02}", now.second()),
            Placeholder::Week => format!("{:02}", now.iso_week().week()),
            Placeholder::Wday => now.weekday().num_days_from_sunday().to_string(),
            Placeholder::Timestamp => now.timestamp().to_string(),
            Placeholder::Uniqid => generate_uniqid(now),
        }
    }
}

/// Every placeholder rendered against one reading of `now`
pub fn placeholder_values(now: &DateTime<FixedOffset>) -> Vec<(Placeholder, String)> {
    Placeholder::ALL
        .into_iter()
        .map(|p| (p, p.render(now)))
        .collect()
}

/// Replace every recognised placeholder in `template`
///
/// All tokens share one set of values, so `{uniqid}` repeated in a template
/// yields the same token each time. Substituted text is not rescanned.
pub fn expand_placeholders(template: &str, now: &DateTime<FixedOffset>) -> String {
    if !has_placeholders(template) {
        return template.to_string();
    }

    let values = placeholder_values(now);
    let expanded = PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            Placeholder::from_name(&caps[1])
                .and_then(|p| values.iter().find(|(q, _)| *q == p))
                .map(|(_, value)| value.clone())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned();

    trace!(template = %template, expanded = %expanded, "Expanded placeholders");
    expanded
}

/// Check if a string contains any placeholder-shaped token
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER_RE.is_match(s)
}

/// 8 hex digits of seconds, 5 of microseconds, 6 random
fn generate_uniqid(now: &DateTime<FixedOffset>) -> String {
    let suffix: u32 = rand::rng().random_range(0..0x100_0000);
    format!(
        "{:08x}{:05x}{:06x}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        suffix
    )
}
