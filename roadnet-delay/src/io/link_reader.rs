use crate::{
    config::ColumnNames,
    model::network::{geometry_type_name, AttributeBag, LinkRecord, NetworkError, Scalar},
};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use geo::{Geometry, Point};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
};
use wkt::TryFromWkt;

/// reads road link records from a CSV file, optionally gzip-compressed. the
/// geometry column holds WKT and an empty value is a missing geometry. all
/// other columns become attributes.
pub fn read_link_records(
    filepath: &str,
    columns: &ColumnNames,
) -> Result<Vec<LinkRecord>, NetworkError> {
    let mut reader = open_reader(filepath)?;
    let headers = reader
        .headers()
        .map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?
        .clone();
    if !headers.iter().any(|h| h == columns.geometry) {
        log::warn!(
            "file {filepath} has no '{}' column, all link records lack a geometry",
            columns.geometry
        );
    }
    let mut records = vec![];
    for row_result in reader.records() {
        let row = row_result.map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?;
        records.push(parse_link_row(&headers, &row, &columns.geometry)?);
    }
    log::info!("read {} link records from {filepath}", records.len());
    Ok(records)
}

/// reads traffic signal locations from the WKT point column of a CSV file.
/// rows with an empty geometry are skipped.
pub fn read_signals(filepath: &str, geometry_column: &str) -> Result<Vec<Point<f64>>, NetworkError> {
    let mut reader = open_reader(filepath)?;
    let headers = reader
        .headers()
        .map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?
        .clone();
    let idx = headers
        .iter()
        .position(|h| h == geometry_column)
        .ok_or_else(|| NetworkError::MissingColumn {
            file: String::from(filepath),
            column: String::from(geometry_column),
        })?;
    let mut signals = vec![];
    for (index, row_result) in reader.records().enumerate() {
        let row = row_result.map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?;
        let geometry = match row.get(idx).map(parse_geometry).transpose()?.flatten() {
            Some(g) => g,
            None => continue,
        };
        match geometry {
            Geometry::Point(p) => signals.push(p),
            other => {
                return Err(NetworkError::UnsupportedGeometry {
                    index,
                    geometry_type: geometry_type_name(&other),
                })
            }
        }
    }
    log::info!("read {} traffic signals from {filepath}", signals.len());
    Ok(signals)
}

/// reads known speed limits keyed by segment id. when a segment id appears
/// more than once, the first limit is kept.
pub fn read_known_speed_limits(
    filepath: &str,
    columns: &ColumnNames,
) -> Result<HashMap<String, Scalar>, NetworkError> {
    let mut reader = open_reader(filepath)?;
    let headers = reader
        .headers()
        .map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?
        .clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| NetworkError::MissingColumn {
                file: String::from(filepath),
                column: String::from(name),
            })
    };
    let id_idx = column_index(&columns.segment_id)?;
    let limit_idx = column_index(&columns.known_speed_limit)?;

    let mut limits: HashMap<String, Scalar> = HashMap::new();
    let mut n_duplicates: usize = 0;
    for row_result in reader.records() {
        let row = row_result.map_err(|e| NetworkError::CsvReadError(String::from(filepath), e))?;
        let id = Scalar::parse(row.get(id_idx).unwrap_or_default());
        if id.is_null() {
            continue;
        }
        let limit = Scalar::parse(row.get(limit_idx).unwrap_or_default());
        let key = id.to_string();
        if limits.contains_key(&key) {
            n_duplicates += 1;
            log::debug!("duplicate known speed limit for segment {key}, keeping the first");
        } else {
            let _ = limits.insert(key, limit);
        }
    }
    if n_duplicates > 0 {
        log::warn!("{n_duplicates} duplicate segment id(s) in {filepath} were ignored");
    }
    Ok(limits)
}

/// copies the known speed limit of each record's segment onto the record.
/// records whose segment has no known limit get a null one.
pub fn join_known_speed_limits(
    records: &mut [LinkRecord],
    limits: &HashMap<String, Scalar>,
    columns: &ColumnNames,
) {
    let mut n_matched: usize = 0;
    for record in records.iter_mut() {
        let limit = record
            .attributes
            .get_scalar(&columns.segment_id)
            .filter(|id| !id.is_null())
            .and_then(|id| limits.get(&id.to_string()))
            .cloned();
        if limit.is_some() {
            n_matched += 1;
        }
        let _ = record.attributes.insert(
            columns.known_speed_limit.as_str(),
            limit.unwrap_or(Scalar::Null),
        );
    }
    log::info!(
        "joined known speed limits onto {n_matched} of {} link records",
        records.len()
    );
}

fn parse_link_row(
    headers: &StringRecord,
    row: &StringRecord,
    geometry_column: &str,
) -> Result<LinkRecord, NetworkError> {
    let mut geometry = None;
    let mut attributes = AttributeBag::new();
    for (header, value) in headers.iter().zip(row.iter()) {
        if header == geometry_column {
            geometry = parse_geometry(value)?;
        } else {
            let _ = attributes.insert(header, Scalar::parse(value));
        }
    }
    Ok(LinkRecord::new(geometry, attributes))
}

fn parse_geometry(value: &str) -> Result<Option<Geometry<f64>>, NetworkError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    Geometry::<f64>::try_from_wkt_str(value)
        .map(Some)
        .map_err(|e| NetworkError::InvalidWkt(format!("{value}: {e}")))
}

fn open_reader(filepath: &str) -> Result<csv::Reader<Box<dyn Read>>, NetworkError> {
    let f = File::open(filepath)
        .map_err(|e| NetworkError::CsvReadError(String::from(filepath), csv::Error::from(e)))?;
    let r: Box<dyn Read> = if filepath.ends_with(".gz") {
        Box::new(BufReader::new(GzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(ReaderBuilder::new().has_headers(true).from_reader(r))
}
