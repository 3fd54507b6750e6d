//! VBB transit data client.
//!
//! This module provides the `TransitProvider` capability used by the
//! departures pipeline, an HTTP implementation against the VBB REST API
//! (`v6.vbb.transport.rest`), and an in-memory mock for tests.
//!
//! Key characteristics of the API:
//! - Station ids are digit strings (e.g. `900023201`); free-text search
//!   returns candidates ranked by relevance
//! - Times are ISO 8601 with the local (Europe/Berlin) offset
//! - Delays are given in seconds and are null when no realtime data exists

mod client;
mod convert;
mod error;
mod mock;
mod types;

use std::future::Future;

use crate::domain::{Departure, DepartureQuery, Station, StationId};

pub use client::{ClientConfig, DEFAULT_BASE_URL, TransitClient};
pub use convert::ConversionError;
pub use error::TransitError;
pub use mock::MockTransitClient;
pub use types::{DepartureDto, DeparturesResponse, LineDto, LocationDto};

/// Source of stations and departures.
///
/// This abstraction allows the pipeline to be tested with mock data.
pub trait TransitProvider {
    /// Search stations by free text, best match first.
    fn search_stations(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<Station>, TransitError>> + Send;

    /// Look up a station by id. `None` if the id is unknown.
    fn station(
        &self,
        id: &StationId,
    ) -> impl Future<Output = Result<Option<Station>, TransitError>> + Send;

    /// Fetch upcoming departures, in scheduled order, at most `query.results`.
    fn departures(
        &self,
        query: &DepartureQuery,
    ) -> impl Future<Output = Result<Vec<Departure>, TransitError>> + Send;
}
