//! Conversion from VBB DTOs to domain types.

use chrono::{DateTime, Duration};
use tracing::{debug, warn};

use crate::domain::{Departure, Product, Station, StationId};

use super::types::{DepartureDto, LocationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a timestamp
    #[error("invalid time: {0}")]
    InvalidTime(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Product not in the known set
    #[error("unknown product: {0}")]
    UnknownProduct(String),
}

/// Convert location search results to stations.
///
/// Addresses and points of interest carry no usable station id and are
/// dropped; order is preserved.
pub fn convert_locations(locations: &[LocationDto]) -> Vec<Station> {
    locations.iter().filter_map(convert_location).collect()
}

/// Convert a single location to a station, if it is one.
pub fn convert_location(location: &LocationDto) -> Option<Station> {
    match location.kind.as_deref() {
        Some("stop") | Some("station") | None => {}
        Some(other) => {
            debug!(kind = other, "ignoring non-station location");
            return None;
        }
    }

    let id = StationId::parse(location.id.as_deref()?).ok()?;
    let name = location.name.clone().unwrap_or_else(|| id.to_string());
    Some(Station::new(id, name))
}

/// Convert departures, skipping entries that cannot be represented.
pub fn convert_departures(departures: &[DepartureDto]) -> Vec<Departure> {
    let mut results = Vec::with_capacity(departures.len());

    for dto in departures {
        match convert_departure(dto) {
            Ok(departure) => results.push(departure),
            Err(e) => {
                warn!(
                    trip = dto.trip_id.as_deref().unwrap_or("?"),
                    error = %e,
                    "skipping departure"
                );
            }
        }
    }

    results
}

/// Convert a single departure.
pub fn convert_departure(dto: &DepartureDto) -> Result<Departure, ConversionError> {
    let line = dto.line.as_ref().ok_or(ConversionError::MissingField("line"))?;

    let product = line
        .product
        .as_deref()
        .ok_or(ConversionError::MissingField("line.product"))?;
    let product =
        Product::parse(product).map_err(|_| ConversionError::UnknownProduct(product.to_string()))?;

    // Scheduled time falls back to the prediction when no plan is given
    let scheduled = dto
        .planned_when
        .as_deref()
        .or(dto.when.as_deref())
        .ok_or(ConversionError::MissingField("plannedWhen"))?;
    let scheduled = DateTime::parse_from_rfc3339(scheduled)
        .map_err(|_| ConversionError::InvalidTime(scheduled.to_string()))?;

    let label = line
        .name
        .clone()
        .or_else(|| line.id.clone())
        .unwrap_or_else(|| "?".to_string());

    Ok(Departure {
        product,
        line: label,
        scheduled,
        delay: dto.delay.and_then(Duration::try_seconds),
        direction: dto.direction.clone(),
        cancelled: dto.cancelled.unwrap_or(false),
    })
}
