//! Countdown labels for the deal cards
use chrono::{DateTime, Duration, Utc};

pub const EXPIRED_LABEL: &str = "Deal Expired";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealTimer {
    pub title: String,
    pub expires_at: DateTime<Utc>,
}

impl DealTimer {
    /// The deal at `index` runs `(index + 1) * hours_step` hours from `start`.
    pub fn new(title: &str, index: usize, start: DateTime<Utc>, hours_step: i64) -> Self {
        let slot = i64::try_from(index).unwrap_or(i64::MAX - 1).saturating_add(1);
        let bound = i64::from(i32::MAX);
        let hours = slot.saturating_mul(hours_step).clamp(-bound, bound);
        let expires_at = start
            .checked_add_signed(Duration::hours(hours))
            .unwrap_or(start);

        Self {
            title: title.to_string(),
            expires_at,
        }
    }

    /// One timer per deal title, staggered by `hours_step`.
    pub fn schedule(titles: &[&str], start: DateTime<Utc>, hours_step: i64) -> Vec<Self> {
        titles
            .iter()
            .enumerate()
            .map(|(index, title)| Self::new(title, index, start, hours_step))
            .collect()
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let left = self.expires_at - now;
        (left > Duration::zero()).then_some(left)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining(now).is_none()
    }

    pub fn label(&self, now: DateTime<Utc>) -> String {
        match self.remaining(now) {
            Some(left) => {
                let secs = left.num_seconds();
                format!(
                    "Ends in: {}h {}m {}s",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
            None => EXPIRED_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn deals_are_staggered() {
        let timers = DealTimer::schedule(&["Flat 50% Off", "Buy 1 Get 1"], start(), 2);

        assert_eq!(timers[0].expires_at, start() + Duration::hours(2));
        assert_eq!(timers[1].expires_at, start() + Duration::hours(4));
    }

    #[test]
    fn label_counts_down() {
        let timer = DealTimer::new("Flat 50% Off", 0, start(), 2);
        let now = start() + Duration::seconds(3 * 60 + 15);

        assert_eq!(timer.label(now), "Ends in: 1h 56m 45s");
    }

    #[test]
    fn label_after_expiry() {
        let timer = DealTimer::new("Flat 50% Off", 0, start(), 2);

        assert_eq!(timer.label(start() + Duration::hours(2)), "Deal Expired");
        assert!(timer.is_expired(start() + Duration::hours(3)));
    }
}
