//! Page geometry attached to detected elements.

use serde::{Deserialize, Deserializer, Serialize};

/// A point in document coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ties an element to a page and a polygon on that page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    /// Page number (1-indexed)
    #[serde(alias = "page_number")]
    pub page_number: u32,

    /// Polygon vertices, clockwise from the top-left corner
    #[serde(default, deserialize_with = "deserialize_polygon")]
    pub polygon: Vec<Point>,
}

impl BoundingRegion {
    /// Create a bounding region from a page number and polygon.
    pub fn new(page_number: u32, polygon: Vec<Point>) -> Self {
        Self {
            page_number,
            polygon,
        }
    }

    /// Create a bounding region with a single-point polygon.
    pub fn at(page_number: u32, x: f64, y: f64) -> Self {
        Self::new(page_number, vec![Point::new(x, y)])
    }

    /// The anchor point of this region: the first polygon vertex.
    ///
    /// All geometric matching uses this point only.
    pub fn anchor(&self) -> Option<Point> {
        self.polygon.first().copied()
    }
}

/// Polygons arrive either as point objects (SDK shape) or as a flat
/// `[x1, y1, x2, y2, ...]` list (REST shape).
#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonRepr {
    Points(Vec<Point>),
    Flat(Vec<f64>),
}

fn deserialize_polygon<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let points = match PolygonRepr::deserialize(deserializer)? {
        PolygonRepr::Points(points) => points,
        PolygonRepr::Flat(values) => {
            if values.len() % 2 != 0 {
                log::debug!(
                    "Polygon has an odd number of coordinates ({}), dropping the last one",
                    values.len()
                );
            }
            values
                .chunks_exact(2)
                .map(|pair| Point::new(pair[0], pair[1]))
                .collect()
        }
    };
    Ok(points)
}
