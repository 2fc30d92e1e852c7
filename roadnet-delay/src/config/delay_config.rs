use super::ColumnNames;
use crate::model::{
    network::MissingGeometryPolicy,
    penalty::{ElementTypeCodes, PenaltyTable},
    DelayCliError,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for an intersection delay run
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct DelayToolConfiguration {
    pub columns: ColumnNames,
    pub element_codes: ElementTypeCodes,
    pub penalties: PenaltyTable,
    pub missing_geometry_policy: MissingGeometryPolicy,
    /// longest chain of nodes a single collapsed path may contain
    pub max_path_length: usize,
    /// speed assigned to pedestrian links, km/h
    pub walking_speed: f64,
    /// intersections closer than this to a traffic signal are signalized
    pub signal_buffer_meters: f64,
    pub excluded_road_types: Vec<i64>,
    /// keep pedestrian links in the simplified delay network. they are
    /// flagged and penalized either way.
    pub keep_pedestrian_links: bool,
    /// replace merged speed limit lists with the limit of the longest segment
    pub harmonize_speed_limits: bool,
    pub parallelize: bool,
    pub overwrite: bool,
}

impl Default for DelayToolConfiguration {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            element_codes: ElementTypeCodes::default(),
            penalties: PenaltyTable::default(),
            missing_geometry_policy: MissingGeometryPolicy::default(),
            max_path_length: 10_000,
            walking_speed: 4.0,
            signal_buffer_meters: 20.0,
            excluded_road_types: vec![7, 99],
            keep_pedestrian_links: false,
            harmonize_speed_limits: false,
            parallelize: true,
            overwrite: false,
        }
    }
}

impl TryFrom<&String> for DelayToolConfiguration {
    type Error = DelayCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let is_toml = f.ends_with(".toml");
        if !is_toml && !f.ends_with(".json") {
            return Err(DelayCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        }
        let s = std::fs::read_to_string(f)
            .map_err(|e| DelayCliError::ConfigurationError(format!("failure reading {f}: {e}")))?;
        let conf: DelayToolConfiguration = if is_toml {
            toml::from_str(&s).map_err(|e| {
                DelayCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            serde_json::from_str(&s).map_err(|e| {
                DelayCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        };
        conf.validate()?;
        Ok(conf)
    }
}

impl DelayToolConfiguration {
    pub fn validate(&self) -> Result<(), DelayCliError> {
        if self.max_path_length < 2 {
            return Err(DelayCliError::ConfigurationError(format!(
                "max_path_length must be at least 2, found {}",
                self.max_path_length
            )));
        }
        if !(self.walking_speed.is_finite() && self.walking_speed > 0.0) {
            return Err(DelayCliError::ConfigurationError(format!(
                "walking_speed must be a positive number, found {}",
                self.walking_speed
            )));
        }
        if !(self.signal_buffer_meters.is_finite() && self.signal_buffer_meters >= 0.0) {
            return Err(DelayCliError::ConfigurationError(format!(
                "signal_buffer_meters must be non-negative, found {}",
                self.signal_buffer_meters
            )));
        }
        self.penalties
            .validate()
            .map_err(|e| DelayCliError::ConfigurationError(e.to_string()))
    }
}
