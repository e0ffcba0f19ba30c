//! Expiry classification.
//!
//! Both sides of the comparison are calendar dates: "now" is normalized to
//! midnight of its own day before subtracting. With both instants at
//! midnight, `ceil((expiry - now) / 1 day)` is exactly the whole-day
//! difference, so a same-day expiry is 0 and yesterday is -1.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use pantry_core::{parse_date, FoodItem, FreshnessState, Result};
use serde::{Deserialize, Serialize};

use crate::policy::ExpiryPolicy;
use crate::urgency::Urgency;

/// Derived expiry facts for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryClassification {
    /// Whole days until expiry, negative once expired
    pub days_left: i64,

    /// Freshness bucket
    pub state: FreshnessState,

    /// Urgency tier inside the bucket
    pub urgency: Urgency,
}

impl ExpiryClassification {
    /// Long label, e.g. "Expires Tomorrow".
    pub fn label(&self) -> String {
        self.urgency.label(self.days_left)
    }

    /// Short badge label, e.g. "2d left".
    pub fn short_label(&self) -> String {
        self.urgency.short_label(self.days_left)
    }

    /// Whether the item is past expiry.
    pub fn is_expired(&self) -> bool {
        self.state == FreshnessState::Expired
    }
}

/// Maps expiry dates to freshness states under an [`ExpiryPolicy`].
#[derive(Debug, Clone, Default)]
pub struct ExpiryClassifier {
    policy: ExpiryPolicy,
}

impl ExpiryClassifier {
    /// Create a classifier with the given thresholds.
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self { policy }
    }

    /// Thresholds in use.
    pub fn policy(&self) -> &ExpiryPolicy {
        &self.policy
    }

    /// Whole days from `today` until `expiry`.
    pub fn days_left(expiry: NaiveDate, today: NaiveDate) -> i64 {
        expiry.signed_duration_since(today).num_days()
    }

    /// Classify an expiry date relative to `today`.
    pub fn classify(&self, expiry: NaiveDate, today: NaiveDate) -> ExpiryClassification {
        let days_left = Self::days_left(expiry, today);
        let urgency = self.urgency_for(days_left);
        ExpiryClassification {
            days_left,
            state: urgency.state(),
            urgency,
        }
    }

    /// Classify relative to an instant, using its calendar day in its own timezone.
    pub fn classify_at<Tz: TimeZone>(
        &self,
        expiry: NaiveDate,
        now: &DateTime<Tz>,
    ) -> ExpiryClassification {
        self.classify(expiry, now.date_naive())
    }

    /// Classify relative to the local calendar day.
    pub fn classify_now(&self, expiry: NaiveDate) -> ExpiryClassification {
        self.classify(expiry, today())
    }

    /// Parse then classify. Fails with `CoreError::InvalidDate`.
    pub fn classify_str(&self, expiry: &str, today: NaiveDate) -> Result<ExpiryClassification> {
        Ok(self.classify(parse_date(expiry)?, today))
    }

    /// Classify an item's expiry date.
    pub fn classify_item(&self, item: &FoodItem, today: NaiveDate) -> ExpiryClassification {
        self.classify(item.expiry_date, today)
    }

    fn urgency_for(&self, days_left: i64) -> Urgency {
        match days_left {
            d if d < 0 => Urgency::Expired,
            0 => Urgency::ExpiresToday,
            1 => Urgency::ExpiresTomorrow,
            d if d <= self.policy.near_expiry_days => Urgency::NearExpiry,
            _ => Urgency::Fresh,
        }
    }
}

/// The local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset, Utc};
    use pantry_core::CoreError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 14).unwrap()
    }

    fn in_days(n: i64) -> NaiveDate {
        today() + Duration::days(n)
    }

    #[test]
    fn test_thresholds() {
        let c = ExpiryClassifier::default();
        let cases = [
            (-5, FreshnessState::Expired, Urgency::Expired),
            (-1, FreshnessState::Expired, Urgency::Expired),
            (0, FreshnessState::NearExpiry, Urgency::ExpiresToday),
            (1, FreshnessState::NearExpiry, Urgency::ExpiresTomorrow),
            (2, FreshnessState::NearExpiry, Urgency::NearExpiry),
            (3, FreshnessState::NearExpiry, Urgency::NearExpiry),
            (4, FreshnessState::Fresh, Urgency::Fresh),
            (30, FreshnessState::Fresh, Urgency::Fresh),
        ];
        for (days, state, urgency) in cases {
            let result = c.classify(in_days(days), today());
            assert_eq!(result.days_left, days);
            assert_eq!(result.state, state, "days_left={}", days);
            assert_eq!(result.urgency, urgency, "days_left={}", days);
        }
    }

    #[test]
    fn test_expired_iff_negative() {
        let c = ExpiryClassifier::default();
        for days in -10..=10 {
            let result = c.classify(in_days(days), today());
            assert_eq!(result.is_expired(), result.days_left < 0);
        }
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let c = ExpiryClassifier::default();
        let late = Utc.with_ymd_and_hms(2025, 1, 14, 23, 59, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 1, 14, 0, 0, 1).unwrap();
        assert_eq!(c.classify_at(today(), &late).days_left, 0);
        assert_eq!(c.classify_at(today(), &early).days_left, 0);
    }

    #[test]
    fn test_now_uses_its_own_timezone() {
        let c = ExpiryClassifier::default();
        // 2025-01-13 20:00 UTC is already 2025-01-14 in UTC+8
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let now = Utc
            .with_ymd_and_hms(2025, 1, 13, 20, 0, 0)
            .unwrap()
            .with_timezone(&tz);
        assert_eq!(c.classify_at(today(), &now).urgency, Urgency::ExpiresToday);
    }

    #[test]
    fn test_wider_window() {
        let c = ExpiryClassifier::new(ExpiryPolicy {
            near_expiry_days: 5,
            ..Default::default()
        });
        assert_eq!(c.classify(in_days(5), today()).state, FreshnessState::NearExpiry);
        assert_eq!(c.classify(in_days(6), today()).state, FreshnessState::Fresh);
    }

    #[test]
    fn test_classify_str() {
        let c = ExpiryClassifier::default();
        let result = c.classify_str("2025-01-15", today()).unwrap();
        assert_eq!(result.label(), "Expires Tomorrow");

        let err = c.classify_str("tomorrow", today()).unwrap_err();
        assert_eq!(err, CoreError::invalid_date("tomorrow"));
    }

    #[test]
    fn test_idempotent() {
        let c = ExpiryClassifier::default();
        let a = c.classify(in_days(2), today());
        let b = c.classify(in_days(2), today());
        assert_eq!(a, b);
        assert_eq!(a.short_label(), "2d left");
    }
}
