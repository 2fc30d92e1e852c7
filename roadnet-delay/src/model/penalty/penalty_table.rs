use super::{PenaltyError, RoadClassBucket};
use serde::{Deserialize, Serialize};

/// penalty values for one time period. the bucket values are additive
/// minutes; `median` is a multiplicative factor on free flow time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodPenalties {
    pub rt12: f64,
    pub rt3: f64,
    pub rt456: f64,
    pub median: f64,
}

impl PeriodPenalties {
    pub fn get(&self, bucket: RoadClassBucket) -> f64 {
        match bucket {
            RoadClassBucket::Rt12 => self.rt12,
            RoadClassBucket::Rt3 => self.rt3,
            RoadClassBucket::Rt456 => self.rt456,
        }
    }

    fn validate(&self, period: &str) -> Result<(), PenaltyError> {
        for (name, value) in [
            ("rt12", self.rt12),
            ("rt3", self.rt3),
            ("rt456", self.rt456),
            ("median", self.median),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PenaltyError::InvalidPenaltyTable(format!(
                    "{period}.{name} must be a non-negative number, found {value}"
                )));
            }
        }
        Ok(())
    }
}

/// intersection delay constants per time period. the defaults are the
/// Digiroad 2018 measurements for the Helsinki region, converted from
/// seconds to minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTable {
    pub rush: PeriodPenalties,
    pub midday: PeriodPenalties,
    pub all_day: PeriodPenalties,
}

impl Default for PenaltyTable {
    fn default() -> Self {
        Self {
            rush: PeriodPenalties {
                rt12: 12.195 / 60.0,
                rt3: 11.199 / 60.0,
                rt456: 10.633 / 60.0,
                median: 2.022762,
            },
            midday: PeriodPenalties {
                rt12: 9.979 / 60.0,
                rt3: 6.650 / 60.0,
                rt456: 7.752 / 60.0,
                median: 1.667750,
            },
            all_day: PeriodPenalties {
                rt12: 11.311 / 60.0,
                rt3: 9.439 / 60.0,
                rt456: 9.362 / 60.0,
                median: 1.884662,
            },
        }
    }
}

impl PenaltyTable {
    pub fn validate(&self) -> Result<(), PenaltyError> {
        self.rush.validate("rush")?;
        self.midday.validate("midday")?;
        self.all_day.validate("all_day")
    }
}

#[cfg(test)]
mod tests {
    use super::PenaltyTable;
    use crate::model::penalty::RoadClassBucket;

    #[test]
    fn test_default_lookup() {
        let table = PenaltyTable::default();
        assert_eq!(table.rush.get(RoadClassBucket::Rt3), 11.199 / 60.0);
        assert_eq!(table.midday.get(RoadClassBucket::Rt456), 7.752 / 60.0);
        assert_eq!(table.all_day.median, 1.884662);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let mut table = PenaltyTable::default();
        table.midday.rt12 = -1.0;
        assert!(table.validate().is_err());
    }
}
