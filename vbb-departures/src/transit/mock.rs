//! Mock transit client for testing without API access.
//!
//! Holds stations and departure boards in memory and serves them as if they
//! were live API responses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{Departure, DepartureQuery, Station, StationId};

use super::TransitProvider;
use super::error::TransitError;

/// Mock transit client that serves in-memory data.
///
/// Searches match case-insensitively on station name; departures are
/// filtered by product and truncated to the requested count, mimicking the
/// real API. Time parameters are ignored since mock data is static.
#[derive(Debug, Default)]
pub struct MockTransitClient {
    stations: Vec<Station>,
    boards: HashMap<StationId, Vec<Departure>>,
    failure: Option<(u16, String)>,
    search_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    departure_calls: AtomicUsize,
    last_query: Mutex<Option<DepartureQuery>>,
}

impl MockTransitClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station. Search results keep insertion order.
    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    /// Set the departure board for a station.
    pub fn with_departures(mut self, station: &StationId, departures: Vec<Departure>) -> Self {
        self.boards.insert(station.clone(), departures);
        self
    }

    /// Make every departures request fail with the given API error.
    pub fn failing_departures(mut self, status: u16, message: impl Into<String>) -> Self {
        self.failure = Some((status, message.into()));
        self
    }

    /// Number of station searches served.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of direct station lookups served.
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Number of departure requests served.
    pub fn departure_calls(&self) -> usize {
        self.departure_calls.load(Ordering::SeqCst)
    }

    /// Total number of requests of any kind.
    pub fn total_calls(&self) -> usize {
        self.search_calls() + self.lookup_calls() + self.departure_calls()
    }

    /// The most recent departures query, if any.
    pub fn last_query(&self) -> Option<DepartureQuery> {
        self.last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TransitProvider for MockTransitClient {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, TransitError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        let needle = query.trim().to_lowercase();
        Ok(self
            .stations
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn station(&self, id: &StationId) -> Result<Option<Station>, TransitError> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self.stations.iter().find(|s| &s.id == id).cloned())
    }

    async fn departures(&self, query: &DepartureQuery) -> Result<Vec<Departure>, TransitError> {
        self.departure_calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_query
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(query.clone());

        if let Some((status, message)) = &self.failure {
            return Err(TransitError::Api {
                status: *status,
                message: message.clone(),
            });
        }

        let board = self.boards.get(&query.station).ok_or_else(|| TransitError::Api {
            status: 404,
            message: format!("No mock data for station {}", query.station),
        })?;

        Ok(board
            .iter()
            .filter(|d| query.products.contains(d.product))
            .take(query.results)
            .cloned()
            .collect())
    }
}
