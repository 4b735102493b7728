//! HTTP client for the NSPD geoportal search API.
//!
//! One request per lookup: the thematic search endpoint answers with GeoJSON
//! features, the first of which carries the parcel's address, category, area
//! and polygon.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::domain::model::{CadastralNumber, Coordinate, ParcelRecord};
use crate::domain::ports::ParcelLookup;
use crate::utils::error::{Result, SurveyError};

pub const DEFAULT_ENDPOINT: &str = "https://nspd.gov.ru";

const SEARCH_PATH: &str = "/api/geoportal/v2/search/geoportal";
const THEMATIC_SEARCH_ID: &str = "1";
// The geoportal rejects requests without a browser-looking agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// The map widget draws at most the four corner vertices.
const MAX_BOUNDARY_VERTICES: usize = 4;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<SearchData>,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    #[serde(default)]
    features: Vec<FeatureDto>,
}

#[derive(Debug, Deserialize)]
struct FeatureDto {
    #[serde(default)]
    properties: PropertiesDto,
    #[serde(default)]
    geometry: Option<GeometryDto>,
}

#[derive(Debug, Default, Deserialize)]
struct PropertiesDto {
    address: Option<String>,
    category: Option<String>,
    // The registry serves the area either as a number or as a string with a
    // comma decimal separator.
    area: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeometryDto {
    #[serde(rename = "type")]
    kind: String,
    // Left as raw JSON: the nesting depth depends on the geometry type, so
    // interpreting it eagerly would fail whole-body decoding for Points.
    #[serde(default)]
    coordinates: serde_json::Value,
}

pub struct NspdClient {
    http: Client,
    base_url: Url,
}

impl NspdClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(endpoint).map_err(|e| SurveyError::InvalidConfigValueError {
            field: "endpoint".to_string(),
            value: endpoint.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(classify_transport)?;

        Ok(Self { http, base_url })
    }

    fn search_url(&self, cadastral_number: &CadastralNumber) -> Result<Url> {
        let mut url =
            self.base_url
                .join(SEARCH_PATH)
                .map_err(|e| SurveyError::InvalidConfigValueError {
                    field: "endpoint".to_string(),
                    value: self.base_url.to_string(),
                    reason: format!("Cannot build search URL: {}", e),
                })?;
        url.query_pairs_mut()
            .append_pair("thematicSearchId", THEMATIC_SEARCH_ID)
            .append_pair("query", cadastral_number.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ParcelLookup for NspdClient {
    async fn lookup(&self, cadastral_number: &CadastralNumber) -> Result<ParcelRecord> {
        let url = self.search_url(cadastral_number)?;
        tracing::debug!("Querying NSPD geoportal: {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        tracing::debug!("NSPD response status: {}", status);

        if !status.is_success() {
            return Err(SurveyError::Registry {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(classify_transport)?;

        let feature = body
            .data
            .map(|d| d.features)
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| SurveyError::NotFound {
                cadastral_number: cadastral_number.to_string(),
            })?;

        let address = feature
            .properties
            .address
            .unwrap_or_else(|| "Адрес не указан".to_string());
        let category = feature
            .properties
            .category
            .unwrap_or_else(|| "Не указана".to_string());
        let area = parse_area(feature.properties.area.as_ref());
        let boundary = extract_boundary(feature.geometry);

        ParcelRecord::new(cadastral_number.clone(), address, area, category, boundary)
    }
}

fn classify_transport(error: reqwest::Error) -> SurveyError {
    if error.is_timeout() {
        SurveyError::Timeout
    } else {
        SurveyError::Transport(error)
    }
}

fn parse_area(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.replace(',', ".").trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// First ring of a Polygon geometry, truncated to the corner vertices.
/// GeoJSON positions are `[lon, lat]`; the record keeps `[lat, lon]`
/// rounded to six decimals, as the original service reports them.
fn extract_boundary(geometry: Option<GeometryDto>) -> Vec<Coordinate> {
    let Some(geometry) = geometry else {
        return Vec::new();
    };
    if geometry.kind != "Polygon" {
        return Vec::new();
    }
    let rings: Vec<Vec<Vec<f64>>> = match serde_json::from_value(geometry.coordinates) {
        Ok(rings) => rings,
        Err(_) => return Vec::new(),
    };
    let Some(ring) = rings.into_iter().next() else {
        return Vec::new();
    };

    ring.into_iter()
        .take(MAX_BOUNDARY_VERTICES)
        .filter_map(|position| {
            let lon = *position.first()?;
            let lat = *position.get(1)?;
            Some(Coordinate {
                lat: round6(lat),
                lon: round6(lon),
            })
        })
        .collect()
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_area_variants() {
        assert_eq!(parse_area(Some(&serde_json::json!(1234.5))), 1234.5);
        assert_eq!(parse_area(Some(&serde_json::json!("1234,5"))), 1234.5);
        assert_eq!(parse_area(Some(&serde_json::json!("1234.5"))), 1234.5);
        assert_eq!(parse_area(Some(&serde_json::json!("garbage"))), 0.0);
        assert_eq!(parse_area(Some(&serde_json::Value::Null)), 0.0);
        assert_eq!(parse_area(None), 0.0);
    }

    #[test]
    fn test_extract_boundary_flips_and_truncates() {
        let geometry = GeometryDto {
            kind: "Polygon".to_string(),
            coordinates: serde_json::json!([[
                [37.6173001, 55.7558004],
                [37.6193, 55.7558],
                [37.6193, 55.7548],
                [37.6173, 55.7548],
                [37.6173, 55.7558],
            ]]),
        };
        let boundary = extract_boundary(Some(geometry));
        assert_eq!(boundary.len(), 4);
        assert_eq!(boundary[0].lat, 55.7558);
        assert_eq!(boundary[0].lon, 37.6173);
    }

    #[test]
    fn test_extract_boundary_ignores_non_polygon() {
        // A Point nests its coordinates two levels shallower than a Polygon.
        let geometry = GeometryDto {
            kind: "Point".to_string(),
            coordinates: serde_json::json!([37.6173, 55.7558]),
        };
        assert!(extract_boundary(Some(geometry)).is_empty());
        assert!(extract_boundary(None).is_empty());
    }

    #[test]
    fn test_extract_boundary_tolerates_malformed_rings() {
        let geometry = GeometryDto {
            kind: "Polygon".to_string(),
            coordinates: serde_json::json!("garbage"),
        };
        assert!(extract_boundary(Some(geometry)).is_empty());
    }
}
