//! Domain types for the departure board.
//!
//! Values here are validated at construction (`StationId`) or derived by
//! the board pipeline (`TrainRecord`, `PlatformGroup`, `StationSnapshot`),
//! so code receiving them can trust their invariants.

mod coordinate;
mod snapshot;
mod station;
mod train;

pub use coordinate::{Coordinate, EARTH_RADIUS_MILES, distance_miles, nearest, ranked};
pub use snapshot::{PlatformGroup, SYSTEM_NAME, ServiceWarning, StationSnapshot};
pub use station::{InvalidStationId, StationId, StationInfo};
pub use train::{TrainRecord, TrainStatus};
