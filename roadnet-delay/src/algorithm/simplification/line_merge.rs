use geo::{Coord, LineString};

/// result of merging path segment geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedLine {
    pub geometry: LineString<f64>,
    /// number of contiguous parts found. more than one means the segments
    /// did not join end to end and were concatenated as-is.
    pub n_parts: usize,
}

impl MergedLine {
    pub fn is_contiguous(&self) -> bool {
        self.n_parts <= 1
    }
}

/// chains line segments given in traversal order into one line. a segment
/// that starts where the previous one ended is appended without repeating
/// the shared coordinate. a segment that does not starts a new part; the
/// parts are then concatenated into a single best-effort line.
pub fn merge_lines(segments: &[&LineString<f64>]) -> MergedLine {
    let mut parts: Vec<Vec<Coord<f64>>> = vec![];
    for segment in segments.iter() {
        let coords = &segment.0;
        let first = match coords.first() {
            Some(c) => c,
            None => continue,
        };
        match parts.last_mut() {
            Some(part) if part.last() == Some(first) => {
                part.extend(coords.iter().skip(1));
            }
            _ => parts.push(coords.clone()),
        }
    }
    let n_parts = parts.len();
    let mut merged: Vec<Coord<f64>> = vec![];
    for part in parts.into_iter() {
        if merged.last().is_some() && merged.last() == part.first() {
            merged.extend(part.into_iter().skip(1));
        } else {
            merged.extend(part);
        }
    }
    MergedLine {
        geometry: LineString::new(merged),
        n_parts,
    }
}
