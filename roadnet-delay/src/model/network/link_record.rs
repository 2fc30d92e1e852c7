use geo::{Geometry, LineString};

use super::{AttributeBag, NetworkError};

/// a raw road link as handed over by the record-reading collaborator: an
/// optional geometry and the attribute bag that came with it.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub geometry: Option<Geometry<f64>>,
    pub attributes: AttributeBag,
}

impl LinkRecord {
    pub fn new(geometry: Option<Geometry<f64>>, attributes: AttributeBag) -> LinkRecord {
        LinkRecord {
            geometry,
            attributes,
        }
    }

    pub fn from_line(line: LineString<f64>, attributes: AttributeBag) -> LinkRecord {
        LinkRecord {
            geometry: Some(Geometry::LineString(line)),
            attributes,
        }
    }

    /// interprets the geometry of this record as a line with at least two
    /// coordinates. `index` is the position of the record in its source and
    /// is used for error reporting only.
    pub fn line_geometry(&self, index: usize) -> Result<LineString<f64>, NetworkError> {
        let line = match &self.geometry {
            None => return Err(NetworkError::MissingGeometry(index)),
            Some(Geometry::LineString(l)) => l.clone(),
            Some(Geometry::Line(l)) => LineString::from(vec![l.start, l.end]),
            Some(other) => {
                return Err(NetworkError::UnsupportedGeometry {
                    index,
                    geometry_type: geometry_type_name(other),
                })
            }
        };
        if line.0.len() < 2 {
            return Err(NetworkError::DegenerateGeometry {
                index,
                n_coords: line.0.len(),
            });
        }
        Ok(line)
    }
}

pub fn geometry_type_name(geometry: &Geometry<f64>) -> String {
    let name = match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    };
    String::from(name)
}

#[cfg(test)]
mod tests {
    use super::LinkRecord;
    use crate::model::network::{AttributeBag, NetworkError};
    use geo::{line_string, Geometry, MultiLineString, Point};

    #[test]
    fn test_missing_geometry() {
        let record = LinkRecord::new(None, AttributeBag::new());
        match record.line_geometry(4) {
            Err(NetworkError::MissingGeometry(4)) => {}
            other => panic!("expected missing geometry error, found {other:?}"),
        }
    }

    #[test]
    fn test_multilinestring_is_not_coerced() {
        let mls = MultiLineString::new(vec![line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]]);
        let record = LinkRecord::new(Some(Geometry::MultiLineString(mls)), AttributeBag::new());
        match record.line_geometry(0) {
            Err(NetworkError::UnsupportedGeometry { geometry_type, .. }) => {
                assert_eq!(geometry_type, "MultiLineString")
            }
            other => panic!("expected unsupported geometry error, found {other:?}"),
        }
    }

    #[test]
    fn test_point_is_unsupported() {
        let record = LinkRecord::new(
            Some(Geometry::Point(Point::new(1.0, 1.0))),
            AttributeBag::new(),
        );
        assert!(matches!(
            record.line_geometry(0),
            Err(NetworkError::UnsupportedGeometry { .. })
        ));
    }

    #[test]
    fn test_single_coordinate_line_is_degenerate() {
        let record = LinkRecord::from_line(line_string![(x: 0.0, y: 0.0)], AttributeBag::new());
        assert!(matches!(
            record.line_geometry(0),
            Err(NetworkError::DegenerateGeometry { n_coords: 1, .. })
        ));
    }
}
