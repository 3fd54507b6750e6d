//! Departure records and the query that fetches them.

use chrono::{DateTime, Duration, FixedOffset, Local};

use super::{Product, ProductSet, StationId};

/// A single upcoming departure at the queried station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Transport mode of the line.
    pub product: Product,

    /// Line label, e.g. "S5" or "M41".
    pub line: String,

    /// Planned departure instant, in the offset reported by the source.
    pub scheduled: DateTime<FixedOffset>,

    /// Realtime delay relative to `scheduled`, if known.
    pub delay: Option<Duration>,

    /// Direction (final stop or headsign), if given.
    pub direction: Option<String>,

    pub cancelled: bool,
}

impl Departure {
    /// Create a departure with no realtime information.
    pub fn new(product: Product, line: impl Into<String>, scheduled: DateTime<FixedOffset>) -> Self {
        Self {
            product,
            line: line.into(),
            scheduled,
            delay: None,
            direction: None,
            cancelled: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }
}

/// One departures request: station, start instant, count and allowed products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    pub station: StationId,
    pub when: DateTime<Local>,
    pub results: usize,
    pub products: ProductSet,
}
