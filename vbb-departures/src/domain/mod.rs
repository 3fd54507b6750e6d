//! Domain types for the departures client.
//!
//! Stations, transport products, departure records and time phrases. Types
//! enforce their invariants at construction, so code that receives them can
//! trust their validity.

mod departure;
mod product;
mod station;
mod when;

pub use departure::{Departure, DepartureQuery};
pub use product::{Product, ProductError, ProductSet};
pub use station::{InvalidStationId, Station, StationId};
pub use when::{WhenError, parse_when};
