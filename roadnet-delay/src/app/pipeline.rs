use crate::{
    algorithm::{
        aggregation::aggregate_edges,
        junction::assign_junction_flags,
        simplification::{simplify_network, SimplifyOptions},
        speed_limit::annotate_travel_times,
    },
    config::DelayToolConfiguration,
    model::{
        network::{build_graph, LinkRecord, NetworkError, NetworkTables},
        penalty::PenaltyAssigner,
        DelayCliError,
    },
};
use geo::Point;

/// removes records whose road type is excluded by the configuration. records
/// without a road type are kept.
pub fn filter_road_types(records: Vec<LinkRecord>, conf: &DelayToolConfiguration) -> Vec<LinkRecord> {
    let n_before = records.len();
    let kept = records
        .into_iter()
        .filter(|r| {
            r.attributes
                .get_i64(&conf.columns.road_type)
                .map(|t| !conf.excluded_road_types.contains(&t))
                .unwrap_or(true)
        })
        .collect::<Vec<_>>();
    log::info!(
        "removed {} link records with excluded road types {:?}",
        n_before - kept.len(),
        conf.excluded_road_types
    );
    kept
}

/// removes records flagged as pedestrian links.
pub fn drop_pedestrian_links(records: Vec<LinkRecord>, conf: &DelayToolConfiguration) -> Vec<LinkRecord> {
    let n_before = records.len();
    let kept = records
        .into_iter()
        .filter(|r| r.attributes.get_i64(&conf.columns.pedestrian) != Some(1))
        .collect::<Vec<_>>();
    log::info!(
        "removed {} pedestrian link records from the delay network",
        n_before - kept.len()
    );
    kept
}

/// builds the road graph of some link records and simplifies it, keeping
/// full lists for the given keys.
pub fn simplified_tables(
    records: &[LinkRecord],
    accumulator_keys: &[&str],
    conf: &DelayToolConfiguration,
) -> Result<NetworkTables, NetworkError> {
    let graph = build_graph(records, conf.missing_geometry_policy)?;
    let options = SimplifyOptions {
        accumulator_keys,
        max_path_length: conf.max_path_length,
    };
    let (_, tables) = simplify_network(&graph, &options)?;
    Ok(tables)
}

/// the full delay run on records that already carry any known speed limits:
/// travel times, junction flags and penalties are assigned to each record,
/// then the records are simplified into a network whose merged edges carry
/// summed travel times.
pub fn delay_network(
    records: Vec<LinkRecord>,
    signals: &[Point<f64>],
    conf: &DelayToolConfiguration,
) -> Result<NetworkTables, DelayCliError> {
    let mut records = filter_road_types(records, conf);
    log::info!("assigning speed limits and free flow times");
    annotate_travel_times(&mut records, conf)?;
    log::info!("assigning junction flags using {} traffic signals", signals.len());
    assign_junction_flags(&mut records, signals, conf)?;
    log::info!("assigning intersection penalties");
    PenaltyAssigner::from(conf).assign_all(&mut records, conf.parallelize)?;
    if !conf.keep_pedestrian_links {
        records = drop_pedestrian_links(records, conf);
    }
    log::info!("simplifying penalized network");
    let aggregation_keys = conf.columns.aggregation_keys();
    let mut tables = simplified_tables(&records, &aggregation_keys, conf)?;
    aggregate_edges(&mut tables.edges, &conf.columns, conf.harmonize_speed_limits);
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::{delay_network, filter_road_types};
    use crate::{
        config::DelayToolConfiguration,
        model::network::{AttributeBag, LinkRecord},
    };

    fn link(coords: &[(f64, f64)], road_type: i64) -> LinkRecord {
        let mut attributes = AttributeBag::new();
        let _ = attributes.insert("road_type", road_type);
        let _ = attributes.insert("element_type", 1_i64);
        LinkRecord::from_line(coords.to_vec().into(), attributes)
    }

    fn sequential_conf() -> DelayToolConfiguration {
        DelayToolConfiguration {
            parallelize: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_excluded_road_types_are_removed() {
        let conf = sequential_conf();
        let records = vec![
            link(&[(0.0, 0.0), (1.0, 0.0)], 3),
            link(&[(1.0, 0.0), (2.0, 0.0)], 7),
            link(&[(2.0, 0.0), (3.0, 0.0)], 99),
            LinkRecord::from_line(vec![(3.0, 0.0), (4.0, 0.0)].into(), AttributeBag::new()),
        ];
        assert_eq!(filter_road_types(records, &conf).len(), 2);
    }

    #[test]
    fn test_chain_becomes_one_penalized_edge() {
        let conf = sequential_conf();
        let columns = &conf.columns;
        let records = vec![
            link(&[(0.0, 0.0), (100.0, 0.0)], 3),
            link(&[(100.0, 0.0), (200.0, 0.0)], 3),
        ];
        let tables = delay_network(records, &[], &conf).unwrap();
        assert_eq!(tables.nodes.len(), 2);
        assert_eq!(tables.edges.len(), 1);
        let attributes = &tables.edges[0].attributes;
        assert_eq!(attributes.get_f64(&columns.length), Some(200.0));
        let free_flow = attributes.get_f64(&columns.free_flow_time).unwrap();
        assert!((free_flow - 0.24).abs() < 1e-9, "found {free_flow}");
        let rush_hour = attributes.get_f64(&columns.rush_hour_time).unwrap();
        assert!(rush_hour >= free_flow);
        for key in columns.junction_keys() {
            assert!(!attributes.contains_key(key));
        }
    }

    #[test]
    fn test_footpath_does_not_split_chain() {
        let conf = sequential_conf();
        let records = vec![
            link(&[(0.0, 0.0), (100.0, 0.0)], 3),
            link(&[(100.0, 0.0), (200.0, 0.0)], 3),
            link(&[(100.0, 0.0), (100.0, 100.0)], 8),
        ];
        let tables = delay_network(records.clone(), &[], &conf).unwrap();
        assert_eq!(tables.nodes.len(), 2);
        assert_eq!(tables.edges.len(), 1);
        let edge = &tables.edges[0];
        assert_eq!((edge.src.x, edge.dst.x), (0.0, 200.0));

        let keep = DelayToolConfiguration {
            keep_pedestrian_links: true,
            ..sequential_conf()
        };
        let tables = delay_network(records, &[], &keep).unwrap();
        assert_eq!(tables.edges.len(), 3);
    }
}
