mod drive_through_times;
mod element_type_codes;
mod junction_flags;
mod penalty_assigner;
mod penalty_error;
mod penalty_row;
mod penalty_rule;
mod penalty_table;
mod road_class_bucket;

pub use drive_through_times::DriveThroughTimes;
pub use element_type_codes::ElementTypeCodes;
pub use junction_flags::JunctionFlags;
pub use penalty_assigner::PenaltyAssigner;
pub use penalty_error::PenaltyError;
pub use penalty_row::PenaltyRow;
pub use penalty_rule::{PenaltyRule, HIGH_SPEED_THRESHOLD};
pub use penalty_table::{PenaltyTable, PeriodPenalties};
pub use road_class_bucket::RoadClassBucket;
