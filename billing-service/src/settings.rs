use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, BillingResult};

/// How a patient's surgery/invoice counters are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatePolicy {
    /// Use the counters stored on the patient record as-is
    #[default]
    Cached,
    /// Recompute counters from the surgery and invoice lists on every read
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingSettings {
    pub aggregate_policy: AggregatePolicy,
    /// Fixed "today" for age and registration dates; the local date when unset
    pub reference_date: Option<NaiveDate>,
    pub recent_surgeries_limit: usize,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            aggregate_policy: AggregatePolicy::Cached,
            reference_date: None,
            recent_surgeries_limit: 3,
        }
    }
}

impl BillingSettings {
    pub fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// # Errors
    ///
    /// Returns [`BillingError::Config`] when the dashboard would show no
    /// recent surgeries at all.
    pub fn validate(&self) -> BillingResult<()> {
        if self.recent_surgeries_limit == 0 {
            return Err(BillingError::Config(
                "recent_surgeries_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = BillingSettings::default();
        assert_eq!(settings.aggregate_policy, AggregatePolicy::Cached);
        assert_eq!(settings.recent_surgeries_limit, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_pinned_reference_date_is_today() {
        let pinned = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let settings = BillingSettings {
            reference_date: Some(pinned),
            ..Default::default()
        };
        assert_eq!(settings.today(), pinned);
    }

    #[test]
    fn test_policy_parses_lowercase() {
        let settings: BillingSettings =
            serde_json::from_str(r#"{ "aggregate_policy": "derived", "reference_date": "2024-06-01" }"#)
                .unwrap();
        assert_eq!(settings.aggregate_policy, AggregatePolicy::Derived);
        assert_eq!(settings.recent_surgeries_limit, 3);
    }

    #[test]
    fn test_zero_recent_limit_is_rejected() {
        let settings = BillingSettings {
            recent_surgeries_limit: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(BillingError::Config(_))));
    }
}
