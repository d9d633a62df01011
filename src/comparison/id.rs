use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a run inside a comparison set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Issues run ids from the creation clock.
///
/// Ids are microsecond timestamps bumped so each one is strictly greater than
/// the last, even when two runs are created within the same tick or the
/// clock steps backwards.
#[derive(Debug, Clone, Default)]
pub struct RunIdGenerator {
    last_micros: Option<i64>,
}

impl RunIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RunId {
        self.next_at(Utc::now())
    }

    pub fn next_at(&mut self, now: DateTime<Utc>) -> RunId {
        let micros = match self.last_micros {
            Some(last) => now.timestamp_micros().max(last.saturating_add(1)),
            None => now.timestamp_micros(),
        };
        self.last_micros = Some(micros);
        RunId(format!("run-{micros}"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::RunIdGenerator;

    #[test]
    fn same_instant_yields_distinct_ids() {
        let now = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant");
        let mut generator = RunIdGenerator::new();
        let first = generator.next_at(now);
        let second = generator.next_at(now);
        assert_ne!(first, second);
        assert_eq!(first.as_str(), "run-1717243200000000");
        assert_eq!(second.as_str(), "run-1717243200000001");
    }

    #[test]
    fn clock_stepping_back_does_not_reuse_ids() {
        let later = Utc
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .single()
            .expect("valid instant");
        let earlier = Utc
            .with_ymd_and_hms(2024, 6, 1, 11, 0, 0)
            .single()
            .expect("valid instant");
        let mut generator = RunIdGenerator::new();
        let first = generator.next_at(later);
        let second = generator.next_at(earlier);
        assert!(second > first);
    }
}
