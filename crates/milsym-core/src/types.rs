//! Shared geometry types.
//!
//! The rule table keys routing decisions on a [`GeometryKind`], while feature
//! stores describe their classes and records with a native [`ShapeType`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geometry kind a routing rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Line,
    Area,
    None,
}

impl GeometryKind {
    /// Returns the name used in rule tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::Line => "Line",
            GeometryKind::Area => "Area",
            GeometryKind::None => "None",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(GeometryKind::Point),
            "line" => Ok(GeometryKind::Line),
            "area" => Ok(GeometryKind::Area),
            "none" => Ok(GeometryKind::None),
            other => Err(format!("Unknown geometry type: {}", other)),
        }
    }
}

/// Native shape type of a feature class or a feature geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Point,
    Multipoint,
    Polyline,
    Polygon,
}

impl ShapeType {
    /// Maps a native shape type to the geometry kind used for routing.
    ///
    /// Multipoints and polylines both route as lines.
    pub fn geometry_kind(&self) -> GeometryKind {
        match self {
            ShapeType::Multipoint | ShapeType::Polyline => GeometryKind::Line,
            ShapeType::Polygon => GeometryKind::Area,
            ShapeType::Point => GeometryKind::Point,
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeType::Point => "point",
            ShapeType::Multipoint => "multipoint",
            ShapeType::Polyline => "polyline",
            ShapeType::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_geometry_kind() {
        assert_eq!(ShapeType::Point.geometry_kind(), GeometryKind::Point);
        assert_eq!(ShapeType::Multipoint.geometry_kind(), GeometryKind::Line);
        assert_eq!(ShapeType::Polyline.geometry_kind(), GeometryKind::Line);
        assert_eq!(ShapeType::Polygon.geometry_kind(), GeometryKind::Area);
    }

    #[test]
    fn test_geometry_kind_parse() {
        assert_eq!("Point".parse::<GeometryKind>().unwrap(), GeometryKind::Point);
        assert_eq!(" line ".parse::<GeometryKind>().unwrap(), GeometryKind::Line);
        assert_eq!("AREA".parse::<GeometryKind>().unwrap(), GeometryKind::Area);
        assert_eq!("None".parse::<GeometryKind>().unwrap(), GeometryKind::None);
        assert!("Polygon".parse::<GeometryKind>().is_err());
    }

    #[test]
    fn test_geometry_kind_display() {
        assert_eq!(GeometryKind::Line.to_string(), "Line");
        assert_eq!(GeometryKind::None.to_string(), "None");
    }
}
