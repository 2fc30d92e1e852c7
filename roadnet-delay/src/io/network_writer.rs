use crate::model::network::{AttributeBag, LinkRecord, NetworkError, NetworkTables};
use csv::QuoteStyle;
use flate2::{write::GzEncoder, Compression};
use itertools::Itertools;
use kdam::tqdm;
use std::{collections::BTreeSet, fs::File, path::Path};
use wkt::ToWkt;

pub mod filenames {
    pub const NODES: &str = "nodes.csv.gz";
    pub const EDGES: &str = "edges.csv.gz";
    pub const LINKS: &str = "links.csv.gz";
}

/// writes the node and edge tables of a road network as gzipped CSV files in
/// a shared directory. the attribute columns are the union of the attribute
/// keys of all rows, in sorted order; list values are written as `[a, b]`.
pub fn write_network(
    tables: &NetworkTables,
    output_directory: &Path,
    geometry_column: &str,
    overwrite: bool,
) -> Result<(), NetworkError> {
    ensure_directory(output_directory)?;

    if let Some(mut writer) = create_writer(output_directory, filenames::NODES, QuoteStyle::Necessary, overwrite)? {
        let keys = attribute_keys(tables.nodes.iter().filter_map(|n| n.attributes.as_ref()));
        let header = ["x", "y", "in_degree", "out_degree", "connections"]
            .into_iter()
            .map(String::from)
            .chain(keys.iter().cloned())
            .collect_vec();
        write_row(&mut writer, filenames::NODES, &header)?;
        let n_nodes = tables.nodes.len();
        for node in tqdm!(tables.nodes.iter(), desc = "write nodes", total = n_nodes) {
            let mut row = vec![
                node.x.to_string(),
                node.y.to_string(),
                node.in_degree.to_string(),
                node.out_degree.to_string(),
                node.connections.to_string(),
            ];
            row.extend(attribute_values(node.attributes.as_ref(), &keys));
            write_row(&mut writer, filenames::NODES, &row)?;
        }
        eprintln!();
        flush(writer, filenames::NODES)?;
    }

    if let Some(mut writer) = create_writer(output_directory, filenames::EDGES, QuoteStyle::Necessary, overwrite)? {
        let keys = attribute_keys(tables.edges.iter().map(|e| &e.attributes));
        let header = ["src_x", "src_y", "dst_x", "dst_y"]
            .into_iter()
            .map(String::from)
            .chain(keys.iter().cloned())
            .chain(std::iter::once(String::from(geometry_column)))
            .collect_vec();
        write_row(&mut writer, filenames::EDGES, &header)?;
        let n_edges = tables.edges.len();
        for edge in tqdm!(tables.edges.iter(), desc = "write edges", total = n_edges) {
            let mut row = vec![
                edge.src.x.to_string(),
                edge.src.y.to_string(),
                edge.dst.x.to_string(),
                edge.dst.y.to_string(),
            ];
            row.extend(attribute_values(Some(&edge.attributes), &keys));
            row.push(edge.geometry.wkt_string());
            write_row(&mut writer, filenames::EDGES, &row)?;
        }
        eprintln!();
        flush(writer, filenames::EDGES)?;
    }
    Ok(())
}

/// writes link records with their attributes and WKT geometry as a gzipped
/// CSV file.
pub fn write_links(
    records: &[LinkRecord],
    output_directory: &Path,
    geometry_column: &str,
    overwrite: bool,
) -> Result<(), NetworkError> {
    ensure_directory(output_directory)?;
    let mut writer = match create_writer(output_directory, filenames::LINKS, QuoteStyle::Necessary, overwrite)? {
        Some(w) => w,
        None => return Ok(()),
    };
    let keys = attribute_keys(records.iter().map(|r| &r.attributes));
    let header = keys
        .iter()
        .cloned()
        .chain(std::iter::once(String::from(geometry_column)))
        .collect_vec();
    write_row(&mut writer, filenames::LINKS, &header)?;
    for record in tqdm!(records.iter(), desc = "write links", total = records.len()) {
        let mut row = attribute_values(Some(&record.attributes), &keys);
        row.push(
            record
                .geometry
                .as_ref()
                .map(|g| g.wkt_string())
                .unwrap_or_default(),
        );
        write_row(&mut writer, filenames::LINKS, &row)?;
    }
    eprintln!();
    flush(writer, filenames::LINKS)
}

fn ensure_directory(output_directory: &Path) -> Result<(), NetworkError> {
    if !output_directory.is_dir() && std::fs::create_dir_all(output_directory).is_err() {
        let dirname = output_directory.as_os_str().to_string_lossy();
        return Err(NetworkError::InternalError(format!(
            "unable to create directory {dirname}"
        )));
    }
    Ok(())
}

/// builds a gzipped CSV writer, or None when the file exists and may not be
/// overwritten.
fn create_writer(
    directory: &Path,
    filename: &str,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<Option<csv::Writer<GzEncoder<File>>>, NetworkError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        log::warn!(
            "{} exists and overwrite is disabled, skipping",
            filepath.to_string_lossy()
        );
        return Ok(None);
    }
    let file = File::create(&filepath)
        .map_err(|e| NetworkError::CsvWriteError(String::from(filename), csv::Error::from(e)))?;
    let buffer = GzEncoder::new(file, Compression::default());
    let writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(quote_style)
        .from_writer(buffer);
    Ok(Some(writer))
}

fn attribute_keys<'a>(bags: impl Iterator<Item = &'a AttributeBag>) -> Vec<String> {
    let keys: BTreeSet<&String> = bags.flat_map(|b| b.keys()).collect();
    keys.into_iter().cloned().collect_vec()
}

fn attribute_values(bag: Option<&AttributeBag>, keys: &[String]) -> Vec<String> {
    keys.iter()
        .map(|k| {
            bag.and_then(|b| b.get(k))
                .map(|v| v.to_string())
                .unwrap_or_default()
        })
        .collect_vec()
}

fn write_row(
    writer: &mut csv::Writer<GzEncoder<File>>,
    filename: &str,
    row: &[String],
) -> Result<(), NetworkError> {
    writer
        .write_record(row)
        .map_err(|e| NetworkError::CsvWriteError(String::from(filename), e))
}

fn flush(writer: csv::Writer<GzEncoder<File>>, filename: &str) -> Result<(), NetworkError> {
    let encoder = writer.into_inner().map_err(|e| {
        NetworkError::CsvWriteError(String::from(filename), csv::Error::from(e.into_error()))
    })?;
    encoder
        .finish()
        .map_err(|e| NetworkError::CsvWriteError(String::from(filename), csv::Error::from(e)))?;
    Ok(())
}
