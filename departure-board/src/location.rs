//! Pull interface to the host's geolocation.
//!
//! The service asks once per snapshot for "the current position, if
//! known". Permission prompts and continuous tracking belong to the host.

use crate::domain::Coordinate;

/// Source of the user's current position.
pub trait LocationProvider: Send + Sync {
    fn current_coordinate(&self) -> Option<Coordinate>;
}

/// A position fixed at construction (or none at all).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinate>);

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self(Some(coordinate))
    }

    pub fn unknown() -> Self {
        Self(None)
    }
}

impl LocationProvider for FixedLocation {
    fn current_coordinate(&self) -> Option<Coordinate> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_location() {
        let here = Coordinate::new(37.7849, -122.4074);
        assert_eq!(FixedLocation::new(here).current_coordinate(), Some(here));
        assert_eq!(FixedLocation::unknown().current_coordinate(), None);
    }
}
