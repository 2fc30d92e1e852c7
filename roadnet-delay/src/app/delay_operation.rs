use super::pipeline::{delay_network, filter_road_types, simplified_tables};
use crate::{
    config::DelayToolConfiguration,
    io::{
        join_known_speed_limits, read_known_speed_limits, read_link_records, read_signals,
        write_links, write_network,
    },
    model::{penalty::PenaltyAssigner, DelayCliError},
};
use clap::Subcommand;
use std::path::Path;

#[derive(Debug, Clone, Subcommand)]
pub enum DelayOperation {
    /// assign intersection delays to a road network and write the simplified result
    Run {
        #[arg(long, help = "path to .csv or .csv.gz file of road links with a WKT geometry column")]
        links_file: String,
        #[arg(long, help = "path to .csv or .csv.gz file of traffic signal points")]
        signals_file: Option<String>,
        #[arg(long, help = "path to .csv or .csv.gz file of known speed limits by segment id")]
        speed_limits_file: Option<String>,
        #[arg(long, help = "path to .toml or .json file with run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for network dataset")]
        output_directory: String,
    },
    /// simplify a road network without assigning delays
    Simplify {
        #[arg(long, help = "path to .csv or .csv.gz file of road links with a WKT geometry column")]
        links_file: String,
        #[arg(long, help = "path to .toml or .json file with run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for network dataset")]
        output_directory: String,
    },
    /// assign delays to road links that already carry junction flags and free flow times
    Penalties {
        #[arg(long, help = "path to .csv or .csv.gz file of road links with a WKT geometry column")]
        links_file: String,
        #[arg(long, help = "path to .toml or .json file with run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for link dataset")]
        output_directory: String,
    },
}

impl DelayOperation {
    pub fn run(&self) -> Result<(), DelayCliError> {
        match self {
            DelayOperation::Run {
                links_file,
                signals_file,
                speed_limits_file,
                configuration_file,
                output_directory,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let mut records = read_link_records(links_file, &conf.columns)?;
                if let Some(f) = speed_limits_file {
                    let limits = read_known_speed_limits(f, &conf.columns)?;
                    join_known_speed_limits(&mut records, &limits, &conf.columns);
                }
                let signals = match signals_file {
                    Some(f) => read_signals(f, &conf.columns.geometry)?,
                    None => {
                        log::warn!("no signals file provided, no intersection is signalized");
                        vec![]
                    }
                };
                let tables = delay_network(records, &signals, &conf)?;
                write_network(
                    &tables,
                    Path::new(output_directory),
                    &conf.columns.geometry,
                    conf.overwrite,
                )?;
                Ok(())
            }
            DelayOperation::Simplify {
                links_file,
                configuration_file,
                output_directory,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let records = read_link_records(links_file, &conf.columns)?;
                let records = filter_road_types(records, &conf);
                let accumulator_keys = conf.columns.accumulator_keys();
                let tables = simplified_tables(&records, &accumulator_keys, &conf)?;
                write_network(
                    &tables,
                    Path::new(output_directory),
                    &conf.columns.geometry,
                    conf.overwrite,
                )?;
                Ok(())
            }
            DelayOperation::Penalties {
                links_file,
                configuration_file,
                output_directory,
            } => {
                let conf = read_configuration(configuration_file.as_ref())?;
                let mut records = read_link_records(links_file, &conf.columns)?;
                PenaltyAssigner::from(&conf).assign_all(&mut records, conf.parallelize)?;
                write_links(
                    &records,
                    Path::new(output_directory),
                    &conf.columns.geometry,
                    conf.overwrite,
                )?;
                Ok(())
            }
        }
    }
}

fn read_configuration(configuration_file: Option<&String>) -> Result<DelayToolConfiguration, DelayCliError> {
    match configuration_file {
        None => Ok(DelayToolConfiguration::default()),
        Some(f) => {
            log::info!("reading configuration from {f}");
            DelayToolConfiguration::try_from(f)
        }
    }
}
