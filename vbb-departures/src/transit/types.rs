//! VBB REST API response DTOs.
//!
//! These types map directly to the JSON returned by `v6.vbb.transport.rest`.
//! They use `Option` liberally because the API omits or nulls fields
//! depending on realtime data availability.

use serde::Deserialize;

/// An entry from `GET /locations`, or the body of `GET /stops/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDto {
    /// "stop", "station", "location" (address) or "poi".
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Station id; absent for addresses.
    pub id: Option<String>,

    /// Human-readable name.
    pub name: Option<String>,
}

/// Response from `GET /stops/{id}/departures`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeparturesResponse {
    pub departures: Vec<DepartureDto>,
}

/// A single departure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureDto {
    pub trip_id: Option<String>,

    /// Predicted departure (ISO 8601 with offset). Null when cancelled.
    pub when: Option<String>,

    /// Scheduled departure (ISO 8601 with offset).
    pub planned_when: Option<String>,

    /// Delay in seconds; null when no realtime data is available.
    pub delay: Option<i64>,

    /// Direction / headsign.
    pub direction: Option<String>,

    pub line: Option<LineDto>,

    /// Present and true when the departure is cancelled.
    pub cancelled: Option<bool>,
}

/// The line a departure belongs to.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDto {
    pub id: Option<String>,

    /// Display name, e.g. "S5", "U2", "M10".
    pub name: Option<String>,

    /// Product name, e.g. "suburban".
    pub product: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_locations() {
        let json = r#"[
            {
                "type": "stop",
                "id": "900023201",
                "name": "S+U Zoologischer Garten Bhf (Berlin)",
                "location": {"type": "location", "latitude": 52.506, "longitude": 13.332},
                "products": {"suburban": true, "subway": true}
            },
            {
                "type": "location",
                "address": "Zoo, Berlin",
                "latitude": 52.5,
                "longitude": 13.3
            }
        ]"#;

        let locations: Vec<LocationDto> = serde_json::from_str(json).unwrap();

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].kind.as_deref(), Some("stop"));
        assert_eq!(locations[0].id.as_deref(), Some("900023201"));
        assert_eq!(
            locations[0].name.as_deref(),
            Some("S+U Zoologischer Garten Bhf (Berlin)")
        );
        assert!(locations[1].id.is_none());
    }

    #[test]
    fn deserialize_departures() {
        let json = r#"{
            "departures": [
                {
                    "tripId": "1|12345|0|86|15032024",
                    "stop": {"type": "stop", "id": "900100003", "name": "S+U Alexanderplatz Bhf (Berlin)"},
                    "when": "2024-03-15T10:02:00+01:00",
                    "plannedWhen": "2024-03-15T10:00:00+01:00",
                    "delay": 120,
                    "platform": "2",
                    "plannedPlatform": "2",
                    "direction": "S Spandau Bhf (Berlin)",
                    "line": {
                        "type": "line",
                        "id": "s5",
                        "name": "S5",
                        "mode": "train",
                        "product": "suburban"
                    },
                    "remarks": []
                }
            ],
            "realtimeDataUpdatedAt": 1710493200
        }"#;

        let response: DeparturesResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.departures.len(), 1);

        let dep = &response.departures[0];
        assert_eq!(dep.planned_when.as_deref(), Some("2024-03-15T10:00:00+01:00"));
        assert_eq!(dep.delay, Some(120));
        assert_eq!(dep.direction.as_deref(), Some("S Spandau Bhf (Berlin)"));
        assert!(dep.cancelled.is_none());

        let line = dep.line.as_ref().unwrap();
        assert_eq!(line.name.as_deref(), Some("S5"));
        assert_eq!(line.product.as_deref(), Some("suburban"));
    }

    #[test]
    fn deserialize_cancelled_departure() {
        let json = r#"{
            "tripId": "1|999|0|86|15032024",
            "when": null,
            "plannedWhen": "2024-03-15T10:10:00+01:00",
            "prognosedWhen": null,
            "delay": null,
            "platform": null,
            "direction": "U Rathaus Spandau",
            "line": {"name": "U7", "product": "subway"},
            "cancelled": true
        }"#;

        let dep: DepartureDto = serde_json::from_str(json).unwrap();

        assert!(dep.when.is_none());
        assert!(dep.delay.is_none());
        assert_eq!(dep.cancelled, Some(true));
    }
}
