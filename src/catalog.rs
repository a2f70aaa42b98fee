//! Location catalog
//!
//! A catalog is the pool of locations a session samples from plus the one
//! required location that closes every session. The built-in catalog covers
//! the CSUN campus; hosts may also load their own from JSON.

use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    Error, constants,
    location::{Bounds, Location},
};

/// Sampleable locations plus the location appended to every session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Catalog {
    /// Locations sessions are sampled from
    #[garde(length(min = 1, max = constants::catalog::MAX_LOCATIONS), dive)]
    locations: Vec<Location>,
    /// Location always asked last
    #[garde(dive)]
    required: Location,
}

impl Catalog {
    /// Builds a catalog after validating every location
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] if the catalog is empty, too large, or
    /// holds an out-of-range location, and [`Error::InvertedBounds`] if a
    /// location's edges are not ordered.
    pub fn new(locations: Vec<Location>, required: Location) -> Result<Self, Error> {
        let catalog = Self {
            locations,
            required,
        };
        catalog.check()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from its JSON form
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] for malformed JSON and the errors of
    /// [`Catalog::new`] for an invalid catalog.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.check()?;
        Ok(catalog)
    }

    fn check(&self) -> Result<(), Error> {
        self.validate()?;
        self.locations
            .iter()
            .chain(std::iter::once(&self.required))
            .try_for_each(Location::check)
    }

    /// The sampleable locations
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// The location closing every session
    pub fn required(&self) -> &Location {
        &self.required
    }

    /// Number of sampleable locations (the required one excluded)
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether there is nothing to sample
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for Catalog {
    /// The CSUN campus catalog
    fn default() -> Self {
        Self {
            locations: campus_locations(),
            required: campus_required_location(),
        }
    }
}

fn location(name: &str, north: f64, south: f64, east: f64, west: f64) -> Location {
    Location::new(
        name,
        Bounds {
            north,
            south,
            east,
            west,
        },
    )
}

fn campus_required_location() -> Location {
    location(
        "Alumni Relations, Reseda Annex (Required)",
        34.240016,
        34.239732,
        -118.535614,
        -118.535947,
    )
}

fn campus_locations() -> Vec<Location> {
    vec![
        location("Campus Store", 34.237781, 34.236974, -118.5276, -118.528689),
        location(
            "Student Recreation Center",
            34.240637,
            34.239253,
            -118.524638,
            -118.525169,
        ),
        location(
            "Jacaranda Hall",
            34.242078,
            34.241009,
            -118.527836,
            -118.529456,
        ),
        location(
            "Chaparral Hall",
            34.238606,
            34.237883,
            -118.526688,
            -118.527224,
        ),
        location(
            "Sierra Hall",
            34.238544,
            34.238069,
            -118.529992,
            -118.531435,
        ),
        location(
            "Delmar T. Oviatt Library",
            34.240402,
            34.239741,
            -118.528619,
            -118.530024,
        ),
        location(
            "Redwood Hall",
            34.242624,
            34.241236,
            -118.525288,
            -118.527047,
        ),
        location("Lot B5", 34.242655, 34.241111, -118.531832, -118.533715),
        location(
            "University Student Union",
            34.240309,
            34.239719,
            -118.525261,
            -118.526602,
        ),
    ]
}
