//! Geometry derived from bulletin coordinates

use std::fmt::{self, Write};

use crate::models::Coordinate;

/// Geometry type tag as stored alongside the geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    /// Closed exterior ring; the first coordinate is repeated as the last
    Polygon(Vec<Coordinate>),
}

impl Geometry {
    /// Classify a coordinate sequence by its length
    ///
    /// - 0 coordinates: no geometry
    /// - 1: point
    /// - 2: line through both, in order
    /// - 3 or more: polygon, ring closed by repeating the first coordinate
    ///
    /// Polygon simplicity is not checked.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        match coords {
            [] => None,
            [point] => Some(Geometry::Point(*point)),
            [_, _] => Some(Geometry::LineString(coords.to_vec())),
            [first, ..] => {
                let mut ring = Vec::with_capacity(coords.len() + 1);
                ring.extend_from_slice(coords);
                ring.push(*first);
                Some(Geometry::Polygon(ring))
            }
        }
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
        }
    }

    /// Coordinates of the geometry, including the closing one for polygons
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            Geometry::Point(point) => std::slice::from_ref(point),
            Geometry::LineString(coords) | Geometry::Polygon(coords) => coords,
        }
    }

    /// Well-known text, longitude first
    pub fn to_wkt(&self) -> String {
        let mut wkt = String::from(self.geometry_type().as_str());
        match self {
            Geometry::Point(point) => {
                let _ = write!(wkt, " ({} {})", point.lon, point.lat);
            }
            Geometry::LineString(coords) => {
                let _ = write!(wkt, " ({})", wkt_sequence(coords));
            }
            Geometry::Polygon(ring) => {
                let _ = write!(wkt, " (({}))", wkt_sequence(ring));
            }
        }
        wkt
    }
}

fn wkt_sequence(coords: &[Coordinate]) -> String {
    coords
        .iter()
        .map(|c| format!("{} {}", c.lon, c.lat))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    #[test]
    fn empty_has_no_geometry() {
        assert_eq!(Geometry::from_coordinates(&[]), None);
    }

    #[test]
    fn single_coordinate_is_point() {
        let geom = Geometry::from_coordinates(&[c(-3.5, 55.25)]).unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::Point);
        assert_eq!(geom.to_wkt(), "POINT (-3.5 55.25)");
    }

    #[test]
    fn two_coordinates_are_line() {
        let geom = Geometry::from_coordinates(&[c(1.0, 2.0), c(3.0, 4.5)]).unwrap();
        assert_eq!(geom.geometry_type(), GeometryType::LineString);
        assert_eq!(geom.coordinates(), &[c(1.0, 2.0), c(3.0, 4.5)]);
        assert_eq!(geom.to_wkt(), "LINESTRING (1 2, 3 4.5)");
    }

    #[test]
    fn three_coordinates_close_polygon_ring() {
        let coords = vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0)];
        let geom = Geometry::from_coordinates(&coords).unwrap();

        assert_eq!(geom.geometry_type(), GeometryType::Polygon);
        assert_eq!(geom.coordinates().len(), 4);
        assert_eq!(geom.coordinates().first(), geom.coordinates().last());
        assert_eq!(geom.to_wkt(), "POLYGON ((0 0, 1 0, 1 1, 0 0))");
        // Input is left untouched
        assert_eq!(coords.len(), 3);
    }

    #[test]
    fn explicitly_closed_input_is_closed_again() {
        let coords = [c(0.0, 0.0), c(1.0, 0.0), c(1.0, 1.0), c(0.0, 0.0)];
        let geom = Geometry::from_coordinates(&coords).unwrap();
        assert_eq!(geom.coordinates().len(), 5);
    }

    #[test]
    fn geometry_type_names() {
        assert_eq!(GeometryType::Point.to_string(), "POINT");
        assert_eq!(GeometryType::LineString.as_str(), "LINESTRING");
        assert_eq!(GeometryType::Polygon.as_str(), "POLYGON");
    }
}
