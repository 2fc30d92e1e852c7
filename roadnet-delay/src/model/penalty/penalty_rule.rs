use super::{
    DriveThroughTimes, ElementTypeCodes, PenaltyError, PenaltyRow, PenaltyTable, RoadClassBucket,
};
use std::fmt::Display;

/// speed limit (km/h) separating slow and fast links.
pub const HIGH_SPEED_THRESHOLD: f64 = 70.0;

/// the mutually exclusive intersection delay rules. exactly one applies to
/// any valid [`PenaltyRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PenaltyRule {
    /// road class outside 1..6, travel time is free flow time
    DriveThrough,
    /// flagged slip road on a slow local street
    SlipRoadSlowLocal,
    /// flagged slip road on some other slow road
    SlipRoadSlow,
    /// flagged slip road at high speed
    SlipRoadFast,
    /// unflagged high speed slip road, free flow scaled by the median factor
    SlipRoadMedian,
    /// unflagged slow slip road
    SlipRoadOther,
    /// high speed link without junctions, multiplicative
    HighSpeedPlain,
    /// traffic signal, or two crossing roads of the same class
    SignalOrSameClass,
    Roundabout,
    /// slow road crossing another road
    SlowCrossing,
    /// generic or pedestrian-adjacent intersection
    GenericLocal,
    /// any other junction
    OtherJunction,
}

impl PenaltyRule {
    /// selects the rule for a row, first match wins. rows of road classes
    /// 1..6 must carry a finite speed limit and valid junction flags.
    pub fn classify(
        row: &PenaltyRow,
        codes: &ElementTypeCodes,
    ) -> Result<(PenaltyRule, Option<RoadClassBucket>), PenaltyError> {
        let bucket = match row.road_class.and_then(RoadClassBucket::from_road_class) {
            Some(bucket) => bucket,
            None => return Ok((PenaltyRule::DriveThrough, None)),
        };
        row.flags.validate()?;
        let speed = match row.speed_limit {
            Some(s) if s.is_finite() => s,
            other => {
                return Err(PenaltyError::PenaltyRuleUnmatched(format!(
                    "road class {bucket} requires a finite speed limit, found {other:?}"
                )))
            }
        };
        let flags = &row.flags;
        let is_slip_road = row.element_type == Some(codes.slip_road);
        let is_roundabout = row.element_type == Some(codes.roundabout);
        let is_fast = speed >= HIGH_SPEED_THRESHOLD;

        let rule = if is_slip_road {
            if flags.slip_road == 1 && flags.sum != 2 {
                match (is_fast, bucket) {
                    (false, RoadClassBucket::Rt456) => PenaltyRule::SlipRoadSlowLocal,
                    (false, _) => PenaltyRule::SlipRoadSlow,
                    (true, _) => PenaltyRule::SlipRoadFast,
                }
            } else if is_fast {
                PenaltyRule::SlipRoadMedian
            } else {
                PenaltyRule::SlipRoadOther
            }
        } else if flags.sum == 0 && is_fast {
            PenaltyRule::HighSpeedPlain
        } else if flags.signal == 1 || flags.sum == 2 {
            PenaltyRule::SignalOrSameClass
        } else if is_roundabout && flags.sum != 0 {
            PenaltyRule::Roundabout
        } else if flags.intersecting == 1 && !is_fast && flags.sum != 2 {
            PenaltyRule::SlowCrossing
        } else if (flags.intersecting == 1 || flags.pedestrian == 1) && flags.sum != 2 {
            PenaltyRule::GenericLocal
        } else {
            PenaltyRule::OtherJunction
        };
        Ok((rule, Some(bucket)))
    }

    /// travel times for a link with the given free flow time (minutes).
    pub fn apply(
        &self,
        free_flow: f64,
        bucket: Option<RoadClassBucket>,
        table: &PenaltyTable,
    ) -> Result<DriveThroughTimes, PenaltyError> {
        let bucket = match (self, bucket) {
            (PenaltyRule::DriveThrough, _) => return Ok(DriveThroughTimes::uniform(free_flow)),
            (PenaltyRule::HighSpeedPlain, _) => {
                return Ok(DriveThroughTimes {
                    rush_hour: free_flow * 1.2,
                    midday: free_flow,
                    all_day: free_flow * 1.1,
                })
            }
            (PenaltyRule::SlipRoadMedian, _) => {
                return Ok(DriveThroughTimes {
                    rush_hour: free_flow * table.rush.median,
                    midday: free_flow * table.midday.median,
                    all_day: free_flow * table.all_day.median,
                })
            }
            (_, Some(bucket)) => bucket,
            (rule, None) => {
                return Err(PenaltyError::PenaltyRuleUnmatched(format!(
                    "rule {rule} requires a road class bucket"
                )))
            }
        };
        let rush = table.rush.get(bucket);
        let mid = table.midday.get(bucket);
        let avg = table.all_day.get(bucket);
        let (rush_penalty, mid_penalty, avg_penalty) = match self {
            PenaltyRule::SlipRoadSlowLocal => (rush / 2.0, (mid / 3.0) * 4.0, (avg / 3.0) * 2.0),
            PenaltyRule::SlipRoadSlow => (rush / 2.0, mid / 3.0, avg / 3.0),
            PenaltyRule::SlipRoadFast => (rush / 2.0, mid / 4.0, avg / 3.0),
            PenaltyRule::SlipRoadOther => ((rush / 2.0) * 2.0, (mid / 3.0) * 4.0, (avg / 3.0) * 2.0),
            PenaltyRule::SignalOrSameClass => (rush, mid, avg),
            PenaltyRule::Roundabout => ((rush / 4.0) * 3.0, mid / 2.0, (avg / 3.0) * 2.0),
            PenaltyRule::SlowCrossing => (rush / 2.0, mid / 4.0, avg / 3.0),
            PenaltyRule::GenericLocal => (rush / 2.0, mid / 2.0, avg / 2.0),
            PenaltyRule::OtherJunction => (rush / 4.0, mid / 4.0, avg / 4.0),
            PenaltyRule::DriveThrough | PenaltyRule::HighSpeedPlain | PenaltyRule::SlipRoadMedian => {
                (0.0, 0.0, 0.0)
            }
        };
        Ok(DriveThroughTimes {
            rush_hour: free_flow + rush_penalty,
            midday: free_flow + mid_penalty,
            all_day: free_flow + avg_penalty,
        })
    }
}

impl Display for PenaltyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PenaltyRule::DriveThrough => "drive_through",
            PenaltyRule::SlipRoadSlowLocal => "slip_road_slow_local",
            PenaltyRule::SlipRoadSlow => "slip_road_slow",
            PenaltyRule::SlipRoadFast => "slip_road_fast",
            PenaltyRule::SlipRoadMedian => "slip_road_median",
            PenaltyRule::SlipRoadOther => "slip_road_other",
            PenaltyRule::HighSpeedPlain => "high_speed_plain",
            PenaltyRule::SignalOrSameClass => "signal_or_same_class",
            PenaltyRule::Roundabout => "roundabout",
            PenaltyRule::SlowCrossing => "slow_crossing",
            PenaltyRule::GenericLocal => "generic_local",
            PenaltyRule::OtherJunction => "other_junction",
        };
        write!(f, "{s}")
    }
}
