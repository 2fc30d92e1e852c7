use super::SignalIndex;
use crate::{
    algorithm::simplification::{simplify_network, SimplifyOptions},
    config::DelayToolConfiguration,
    model::{
        network::{build_graph, CoordKey, LinkRecord, NetworkError},
        penalty::JunctionFlags,
    },
};
use geo::Point;
use kdam::tqdm;
use std::collections::HashSet;

/// flags the junction types of every record. pedestrian links (speed limit
/// equal to walking speed) are flagged as pedestrian. the remaining links are
/// built into a simplified network whose intersections near a traffic signal
/// are signalized; links starting or ending at one are flagged as signal.
/// slip roads are flagged by element type and every other drivable link is
/// flagged as intersecting.
pub fn assign_junction_flags(
    records: &mut [LinkRecord],
    signals: &[Point<f64>],
    conf: &DelayToolConfiguration,
) -> Result<(), NetworkError> {
    let columns = &conf.columns;
    let is_pedestrian = |record: &LinkRecord| {
        record.attributes.get_f64(&columns.speed_limit) == Some(conf.walking_speed)
    };

    let drivable = records
        .iter()
        .filter(|r| !is_pedestrian(r))
        .cloned()
        .collect::<Vec<_>>();
    let signal_nodes = signalized_intersections(&drivable, signals, conf)?;

    let n_records = records.len();
    let iter = tqdm!(
        records.iter_mut().enumerate(),
        desc = "assign junction flags",
        total = n_records
    );
    for (index, record) in iter {
        let flags = if is_pedestrian(record) {
            JunctionFlags::new(false, false, false, true)
        } else {
            let touches_signal = match record.line_geometry(index) {
                Ok(line) => {
                    let ends = [line.0.first(), line.0.last()];
                    ends.into_iter()
                        .flatten()
                        .any(|c| signal_nodes.contains(&CoordKey::from(c)))
                }
                Err(NetworkError::MissingGeometry(_)) => false,
                Err(e) => return Err(e),
            };
            let is_slip_road =
                record.attributes.get_i64(&columns.element_type) == Some(conf.element_codes.slip_road);
            let intersecting = !touches_signal && !is_slip_road;
            JunctionFlags::new(touches_signal, intersecting, is_slip_road, false)
        };
        let attributes = &mut record.attributes;
        let _ = attributes.insert(columns.signal.as_str(), flags.signal);
        let _ = attributes.insert(columns.intersecting.as_str(), flags.intersecting);
        let _ = attributes.insert(columns.slip_road.as_str(), flags.slip_road);
        let _ = attributes.insert(columns.pedestrian.as_str(), flags.pedestrian);
        let _ = attributes.insert(columns.junction_sum.as_str(), flags.sum);
    }
    Ok(())
}

/// intersections (nodes with more than one connection in the simplified
/// drivable network) within the signal buffer of a traffic signal.
pub fn signalized_intersections(
    drivable: &[LinkRecord],
    signals: &[Point<f64>],
    conf: &DelayToolConfiguration,
) -> Result<HashSet<CoordKey>, NetworkError> {
    let index = SignalIndex::new(signals, conf.signal_buffer_meters);
    if index.is_empty() {
        log::info!("no traffic signals provided, skipping signal detection");
        return Ok(HashSet::new());
    }
    let graph = build_graph(drivable, conf.missing_geometry_policy)?;
    let accumulator_keys = conf.columns.accumulator_keys();
    let options = SimplifyOptions {
        accumulator_keys: &accumulator_keys,
        max_path_length: conf.max_path_length,
    };
    let (_, tables) = simplify_network(&graph, &options)?;
    let signalized = tables
        .intersections()
        .map(|n| CoordKey::new(n.x, n.y))
        .filter(|c| index.is_signalized(c))
        .collect::<HashSet<_>>();
    log::info!(
        "{} intersections lie within {} m of the {} traffic signals",
        signalized.len(),
        conf.signal_buffer_meters,
        index.len()
    );
    Ok(signalized)
}

#[cfg(test)]
mod tests {
    use super::assign_junction_flags;
    use crate::{
        config::DelayToolConfiguration,
        model::network::{AttributeBag, LinkRecord},
    };
    use geo::Point;

    fn record(conf: &DelayToolConfiguration, a: (f64, f64), b: (f64, f64), speed: f64, element_type: i64) -> LinkRecord {
        let mut attributes = AttributeBag::new();
        let _ = attributes.insert(conf.columns.speed_limit.as_str(), speed);
        let _ = attributes.insert(conf.columns.element_type.as_str(), element_type);
        LinkRecord::from_line(vec![a, b].into(), attributes)
    }

    #[test]
    fn test_flags() {
        let conf = DelayToolConfiguration::default();
        // a T junction at (100, 0) with a signal nearby, a slip road further
        // east and a footpath
        let mut records = vec![
            record(&conf, (0.0, 0.0), (100.0, 0.0), 50.0, 1),
            record(&conf, (100.0, 0.0), (200.0, 0.0), 50.0, 1),
            record(&conf, (100.0, 0.0), (100.0, 100.0), 50.0, 1),
            record(&conf, (200.0, 0.0), (300.0, 0.0), 80.0, 6),
            record(&conf, (300.0, 0.0), (300.0, 100.0), 50.0, 1),
            record(&conf, (300.0, 0.0), (400.0, 0.0), 50.0, 1),
            record(&conf, (0.0, 0.0), (0.0, 50.0), conf.walking_speed, 1),
        ];
        let signals = vec![Point::new(105.0, 5.0)];
        assign_junction_flags(&mut records, &signals, &conf).unwrap();
        let flags = records
            .iter()
            .map(|r| {
                conf.columns
                    .junction_keys()
                    .iter()
                    .map(|k| r.attributes.get_i64(k).unwrap())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        assert_eq!(flags[0], vec![1, 0, 0, 0, 1]);
        assert_eq!(flags[1], vec![1, 0, 0, 0, 1]);
        assert_eq!(flags[2], vec![1, 0, 0, 0, 1]);
        assert_eq!(flags[3], vec![0, 0, 1, 0, 1]);
        assert_eq!(flags[4], vec![0, 1, 0, 0, 1]);
        assert_eq!(flags[5], vec![0, 1, 0, 0, 1]);
        assert_eq!(flags[6], vec![0, 0, 0, 1, 1]);
    }

    #[test]
    fn test_without_signals_all_drivable_links_intersect() {
        let conf = DelayToolConfiguration::default();
        let mut records = vec![record(&conf, (0.0, 0.0), (10.0, 0.0), 50.0, 1)];
        assign_junction_flags(&mut records, &[], &conf).unwrap();
        assert_eq!(records[0].attributes.get_i64(&conf.columns.intersecting), Some(1));
        assert_eq!(records[0].attributes.get_i64(&conf.columns.junction_sum), Some(1));
    }
}
