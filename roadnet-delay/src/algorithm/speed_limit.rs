use crate::{
    config::DelayToolConfiguration,
    model::network::{LinkRecord, NetworkError},
};
use geo::{Euclidean, Length as _, LineString};
use kdam::tqdm;
use uom::si::{
    f64::{Length, Time, Velocity},
    length::meter,
    time::minute,
    velocity::kilometer_per_hour,
};

/// speed limit (km/h) of a link: the known limit when positive, otherwise
/// a default by functional road class. classes without a default have no
/// speed limit.
pub fn assign_speed_limit(known: Option<f64>, road_type: Option<i64>, walking_speed: f64) -> Option<f64> {
    match known {
        Some(limit) if limit > 0.0 => Some(limit),
        _ => match road_type? {
            1 => Some(90.0),
            2 => Some(80.0),
            3 | 4 => Some(50.0),
            5 | 6 => Some(40.0),
            8 => Some(walking_speed),
            _ => None,
        },
    }
}

/// planar length of a line in a metric projection.
pub fn planar_length(line: &LineString<f64>) -> Length {
    Length::new::<meter>(Euclidean.length(line))
}

/// minutes needed to traverse some distance at a speed limit given in km/h.
pub fn free_flow_minutes(length: Length, speed_kmh: f64) -> Option<f64> {
    if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
        return None;
    }
    let velocity = Velocity::new::<kilometer_per_hour>(speed_kmh);
    let time: Time = length / velocity;
    Some(time.get::<minute>())
}

/// writes the assigned speed limit, length and free flow time onto each
/// record. records without a line geometry get a null length and free flow
/// time.
pub fn annotate_travel_times(
    records: &mut [LinkRecord],
    conf: &DelayToolConfiguration,
) -> Result<(), NetworkError> {
    let columns = &conf.columns;
    let n_records = records.len();
    let mut n_unassigned: usize = 0;
    let iter = tqdm!(
        records.iter_mut().enumerate(),
        desc = "assign speed limits",
        total = n_records
    );
    for (index, record) in iter {
        let known = record.attributes.get_f64(&columns.known_speed_limit);
        let road_type = record.attributes.get_i64(&columns.road_type);
        let speed = assign_speed_limit(known, road_type, conf.walking_speed);
        if speed.is_none() {
            n_unassigned += 1;
        }
        let length = match record.line_geometry(index) {
            Ok(line) => Some(planar_length(&line)),
            Err(NetworkError::MissingGeometry(_)) => None,
            Err(e) => return Err(e),
        };
        let free_flow = match (length, speed) {
            (Some(l), Some(s)) => free_flow_minutes(l, s),
            _ => None,
        };
        let attributes = &mut record.attributes;
        attributes.set_f64(&columns.speed_limit, speed);
        attributes.set_f64(&columns.length, length.map(|l| l.get::<meter>()));
        attributes.set_f64(&columns.free_flow_time, free_flow);
    }
    if n_unassigned > 0 {
        log::warn!("{n_unassigned} of {n_records} records have no speed limit");
    }
    Ok(())
}
