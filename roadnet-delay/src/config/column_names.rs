use serde::{Deserialize, Serialize};

/// attribute names used to read and write link records. the defaults match
/// the columns produced by the bundled reader.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    /// geometry column of the link and signal tables, as WKT
    pub geometry: String,
    /// join key between the link table and the known speed limit table
    pub segment_id: String,
    /// functional road class, 1..6 for drivable roads
    pub road_type: String,
    pub element_type: String,
    pub known_speed_limit: String,
    /// assigned speed limit in km/h
    pub speed_limit: String,
    /// length in metres
    pub length: String,
    /// free flow travel time in minutes
    pub free_flow_time: String,
    pub signal: String,
    pub intersecting: String,
    pub slip_road: String,
    pub pedestrian: String,
    pub junction_sum: String,
    pub rush_hour_time: String,
    pub midday_time: String,
    pub all_day_time: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            geometry: String::from("geometry"),
            segment_id: String::from("segment_id"),
            road_type: String::from("road_type"),
            element_type: String::from("element_type"),
            known_speed_limit: String::from("known_speed_limit"),
            speed_limit: String::from("speed_limit"),
            length: String::from("length"),
            free_flow_time: String::from("free_flow_time"),
            signal: String::from("jtype1"),
            intersecting: String::from("jtype2"),
            slip_road: String::from("jtype3"),
            pedestrian: String::from("jtype4"),
            junction_sum: String::from("jtype5"),
            rush_hour_time: String::from("rush_hour_time"),
            midday_time: String::from("midday_time"),
            all_day_time: String::from("all_day_time"),
        }
    }
}

impl ColumnNames {
    /// keys that always stay full ordered lists when edges are merged.
    pub fn accumulator_keys(&self) -> [&str; 2] {
        [self.speed_limit.as_str(), self.length.as_str()]
    }

    /// accumulator keys of the simplification pass that follows penalty
    /// assignment. travel times must keep one value per segment to be summed.
    pub fn aggregation_keys(&self) -> Vec<&str> {
        let mut keys = self.accumulator_keys().to_vec();
        keys.extend(self.summed_keys());
        keys
    }

    /// the four junction flag keys followed by their sum.
    pub fn junction_keys(&self) -> [&str; 5] {
        [
            self.signal.as_str(),
            self.intersecting.as_str(),
            self.slip_road.as_str(),
            self.pedestrian.as_str(),
            self.junction_sum.as_str(),
        ]
    }

    /// keys whose merged lists are summed after the second simplification pass.
    pub fn summed_keys(&self) -> [&str; 4] {
        [
            self.free_flow_time.as_str(),
            self.rush_hour_time.as_str(),
            self.midday_time.as_str(),
            self.all_day_time.as_str(),
        ]
    }
}
