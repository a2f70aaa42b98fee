//! Geographic primitives
//!
//! Guesses are latitude/longitude points and every quiz location accepts
//! guesses inside an axis-aligned rectangle of latitude/longitude edges.

use derive_more::Display;
use enum_map::Enum;
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{Error, constants};

/// A latitude/longitude pair in degrees, as produced by a map click
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Point {
    /// Creates a point from a latitude and a longitude
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned acceptance region of a location
///
/// The rectangle does not wrap around the antimeridian: `west` must not be
/// greater than `east`, nor `south` greater than `north`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Bounds {
    /// Northern edge latitude
    #[garde(range(min = -90.0, max = 90.0))]
    pub north: f64,
    /// Southern edge latitude
    #[garde(range(min = -90.0, max = 90.0))]
    pub south: f64,
    /// Eastern edge longitude
    #[garde(range(min = -180.0, max = 180.0))]
    pub east: f64,
    /// Western edge longitude
    #[garde(range(min = -180.0, max = 180.0))]
    pub west: f64,
}

impl Bounds {
    /// Checks whether a point lies inside the rectangle
    ///
    /// All four edges are inclusive: a point exactly on an edge counts as
    /// inside.
    pub fn contains(&self, point: Point) -> bool {
        (self.south..=self.north).contains(&point.lat)
            && (self.west..=self.east).contains(&point.lng)
    }

    /// Returns the center of the rectangle
    pub fn center(&self) -> Point {
        Point::new(
            (self.north + self.south) / 2.,
            (self.east + self.west) / 2.,
        )
    }

    /// Whether the edges are ordered (south below north, west left of east)
    fn is_ordered(&self) -> bool {
        self.south <= self.north && self.west <= self.east
    }
}

/// A named place the player has to find on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    /// Name shown as the question
    #[garde(length(min = 1, max = constants::catalog::MAX_NAME_LENGTH))]
    pub name: String,
    /// Region accepted as a correct answer
    #[garde(dive)]
    pub bounds: Bounds,
}

impl Location {
    /// Creates a location from its name and acceptance region
    pub fn new(name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            name: name.into(),
            bounds,
        }
    }

    /// Evaluates a guess against this location
    pub fn judge(&self, point: Point) -> Verdict {
        if self.bounds.contains(point) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    /// Validates field ranges and edge ordering
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] when a field is out of range and
    /// [`Error::InvertedBounds`] when the edges are not ordered.
    pub fn check(&self) -> Result<(), Error> {
        self.validate()?;
        if self.bounds.is_ordered() {
            Ok(())
        } else {
            Err(Error::InvertedBounds(self.name.clone()))
        }
    }
}

/// Outcome of a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Display, Serialize, Deserialize)]
pub enum Verdict {
    /// The guess landed inside the location's bounds
    Correct,
    /// The guess landed outside the location's bounds
    Incorrect,
}

/// Stroke and fill colors of a region overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionStyle {
    /// Outline color as a CSS hex string
    pub stroke: &'static str,
    /// Fill color as a CSS hex string
    pub fill: &'static str,
}

impl Verdict {
    /// Whether the verdict is [`Verdict::Correct`]
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }

    /// Feedback text shown to the player
    pub fn message(self) -> &'static str {
        match self {
            Self::Correct => constants::text::CORRECT,
            Self::Incorrect => constants::text::INCORRECT,
        }
    }

    /// Overlay colors: green for a correct guess, red otherwise
    pub fn region_style(self) -> RegionStyle {
        match self {
            Self::Correct => RegionStyle {
                stroke: "#1f7a3a",
                fill: "#5ac878",
            },
            Self::Incorrect => RegionStyle {
                stroke: "#b02a2a",
                fill: "#ff5050",
            },
        }
    }
}
