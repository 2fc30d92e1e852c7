use super::PenaltyError;

/// junction type flags of a road link. each of the four flags is 0 or 1 and
/// `sum` counts the flags that are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct JunctionFlags {
    pub signal: i64,
    pub intersecting: i64,
    pub slip_road: i64,
    pub pedestrian: i64,
    pub sum: i64,
}

impl JunctionFlags {
    /// flags with a consistent sum.
    pub fn new(signal: bool, intersecting: bool, slip_road: bool, pedestrian: bool) -> JunctionFlags {
        let mut flags = JunctionFlags {
            signal: i64::from(signal),
            intersecting: i64::from(intersecting),
            slip_road: i64::from(slip_road),
            pedestrian: i64::from(pedestrian),
            sum: 0,
        };
        flags.sum = flags.computed_sum();
        flags
    }

    pub fn computed_sum(&self) -> i64 {
        self.signal + self.intersecting + self.slip_road + self.pedestrian
    }

    /// confirms every flag is 0 or 1 and that the sum agrees with them.
    pub fn validate(&self) -> Result<(), PenaltyError> {
        for (name, value) in [
            ("signal", self.signal),
            ("intersecting", self.intersecting),
            ("slip road", self.slip_road),
            ("pedestrian", self.pedestrian),
        ] {
            if value != 0 && value != 1 {
                return Err(PenaltyError::PenaltyRuleUnmatched(format!(
                    "{name} flag must be 0 or 1, found {value}"
                )));
            }
        }
        if self.sum != self.computed_sum() {
            return Err(PenaltyError::PenaltyRuleUnmatched(format!(
                "junction sum {} does not match the {} flag(s) set",
                self.sum,
                self.computed_sum()
            )));
        }
        Ok(())
    }
}
