//! The departures pipeline.
//!
//! Resolves each option in turn (station, time, count, products), asking
//! the user where requested, then fetches and renders the departures:
//!
//! ```text
//! Options ─► station ─► when ─► results ─► products ─► fetch ─► render
//! ```
//!
//! Every step short-circuits on failure; nothing after a failed step runs.

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::cli::{Field, Options, Prompter};
use crate::domain::{DepartureQuery, ProductSet, Station, StationId, parse_when};
use crate::error::AppError;
use crate::render::{self, Theme};
use crate::transit::TransitProvider;

/// Number of departures shown when none is requested.
pub const DEFAULT_RESULTS: usize = 8;

/// Upper bound on the number of departures requested.
pub const MAX_RESULTS: usize = 100;

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub station: Station,
    pub query: DepartureQuery,
}

/// Resolve, fetch and render. Returns the text for stdout.
pub async fn run<P, Q>(
    options: &Options,
    provider: &P,
    prompter: &mut Q,
    now: DateTime<Local>,
    theme: Theme,
) -> Result<String, AppError>
where
    P: TransitProvider,
    Q: Prompter,
{
    let resolved = resolve(options, provider, prompter, now).await?;
    debug!(
        station = %resolved.station,
        when = %resolved.query.when,
        results = resolved.query.results,
        products = %resolved.query.products,
        "fetching departures"
    );

    let departures = provider.departures(&resolved.query).await?;
    Ok(render::departures_table(&departures, theme))
}

/// Resolve every option into a departures query.
pub async fn resolve<P, Q>(
    options: &Options,
    provider: &P,
    prompter: &mut Q,
    now: DateTime<Local>,
) -> Result<Resolved, AppError>
where
    P: TransitProvider,
    Q: Prompter,
{
    let station = resolve_station(&options.station, provider, prompter).await?;
    let when = resolve_when(&options.when, prompter, now)?;
    let results = resolve_results(&options.results, prompter)?;
    let products = resolve_products(&options.products, prompter)?;

    Ok(Resolved {
        query: DepartureQuery {
            station: station.id.clone(),
            when,
            results,
            products,
        },
        station,
    })
}

async fn resolve_station<P, Q>(
    field: &Field<String>,
    provider: &P,
    prompter: &mut Q,
) -> Result<Station, AppError>
where
    P: TransitProvider,
    Q: Prompter,
{
    let raw = match field {
        Field::Provided(raw) => raw.clone(),
        Field::PromptRequested | Field::Absent => prompter.ask("Where?", None)?,
    };

    find_station(&raw, provider).await
}

/// Resolve station input to exactly one station.
///
/// Digit-only input is a station id and is looked up directly; anything else
/// is searched and the first match wins.
pub async fn find_station<P: TransitProvider>(raw: &str, provider: &P) -> Result<Station, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::NoStation);
    }

    if let Ok(id) = StationId::parse(raw) {
        return provider
            .station(&id)
            .await?
            .ok_or_else(|| AppError::StationNotFound(raw.to_string()));
    }

    let candidates = provider.search_stations(raw).await?;
    debug!(query = raw, candidates = candidates.len(), "station search");

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| AppError::StationNotFound(raw.to_string()))
}

fn resolve_when<Q: Prompter>(
    field: &Field<String>,
    prompter: &mut Q,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, AppError> {
    match field {
        Field::Provided(raw) => Ok(parse_when(raw, &now)?),
        Field::PromptRequested => {
            let answer = prompter.ask("When?", Some("now"))?;
            Ok(parse_when(&answer, &now)?)
        }
        Field::Absent => Ok(now),
    }
}

fn resolve_results<Q: Prompter>(field: &Field<String>, prompter: &mut Q) -> Result<usize, AppError> {
    match field {
        Field::Provided(raw) => parse_results(raw),
        Field::PromptRequested => {
            let default = DEFAULT_RESULTS.to_string();
            let answer = prompter.ask("How many results?", Some(default.as_str()))?;
            parse_results(&answer)
        }
        Field::Absent => Ok(DEFAULT_RESULTS),
    }
}

/// Parse a result count: a positive integer, capped at [`MAX_RESULTS`].
pub fn parse_results(raw: &str) -> Result<usize, AppError> {
    let raw = raw.trim();
    let count: usize = raw
        .parse()
        .map_err(|_| AppError::InvalidResultCount(raw.to_string()))?;

    if count == 0 {
        return Err(AppError::InvalidResultCount(raw.to_string()));
    }

    if count > MAX_RESULTS {
        warn!(requested = count, max = MAX_RESULTS, "capping result count");
        return Ok(MAX_RESULTS);
    }

    Ok(count)
}

fn resolve_products<Q: Prompter>(
    field: &Field<String>,
    prompter: &mut Q,
) -> Result<ProductSet, AppError> {
    match field {
        Field::Provided(raw) => Ok(ProductSet::parse(raw)?),
        Field::PromptRequested => {
            let answer = prompter.ask("Which means of transport?", Some("all"))?;
            Ok(ProductSet::parse(&answer)?)
        }
        Field::Absent => Ok(ProductSet::all()),
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
