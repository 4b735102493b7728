use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::services;
use crate::utils::error::{Result, SurveyError};
use crate::utils::validation::is_valid_cadastral_number;

/// A structurally valid cadastral identifier, e.g. `77:09:0005004:1234`.
///
/// The only way to obtain one is through the validating [`FromStr`] /
/// [`TryFrom<String>`] constructors, so holding a value implies the grammar
/// check has passed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CadastralNumber(String);

impl CadastralNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CadastralNumber {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self> {
        if is_valid_cadastral_number(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(SurveyError::InvalidCadastralNumber {
                value: s.to_string(),
            })
        }
    }
}

impl TryFrom<String> for CadastralNumber {
    type Error = SurveyError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CadastralNumber> for String {
    fn from(value: CadastralNumber) -> Self {
        value.0
    }
}

impl fmt::Display for CadastralNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A boundary vertex. Serialized as a `[lat, lon]` pair, the order the
/// registry uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "(f64, f64)")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.lat, value.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Derived survey pricing for a parcel. Produced only by
/// [`services::estimate`], which guarantees `total_cost` is exactly
/// `points_count * cost_per_point`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub points_count: u32,
    pub cost_per_point: u32,
    pub total_cost: u64,
}

/// The outcome of one successful parcel lookup.
///
/// Constructed atomically by [`ParcelRecord::new`] and never mutated; a new
/// lookup replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    pub cadastral_number: CadastralNumber,
    pub address: String,
    /// Parcel area in square meters, always finite and positive.
    pub area: f64,
    pub category: String,
    #[serde(flatten)]
    pub estimate: CostEstimate,
    /// Polygon vertices, at least one.
    #[serde(rename = "coordinates")]
    pub boundary: Vec<Coordinate>,
}

impl ParcelRecord {
    /// Assembles a record and derives its cost estimate from `area_sq_m`.
    /// Rejects a non-positive or non-finite area and an empty boundary.
    pub fn new(
        cadastral_number: CadastralNumber,
        address: String,
        area_sq_m: f64,
        category: String,
        boundary: Vec<Coordinate>,
    ) -> Result<Self> {
        if boundary.is_empty() {
            return Err(SurveyError::InvalidParcelData {
                message: "boundary must contain at least one vertex".to_string(),
            });
        }

        let estimate = services::estimate(area_sq_m)?;

        Ok(Self {
            cadastral_number,
            address,
            area: area_sq_m,
            category,
            estimate,
            boundary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number() -> CadastralNumber {
        "77:09:0005004:1234".parse().expect("valid number")
    }

    #[test]
    fn test_cadastral_number_parse() {
        assert_eq!(number().as_str(), "77:09:0005004:1234");
        assert!("77-09-0005004-1234".parse::<CadastralNumber>().is_err());
        assert!("".parse::<CadastralNumber>().is_err());
    }

    #[test]
    fn test_record_requires_boundary() {
        let err = ParcelRecord::new(
            number(),
            "ул. Ленина, 1".to_string(),
            1000.0,
            "Земли населённых пунктов".to_string(),
            Vec::new(),
        );
        assert!(matches!(err, Err(SurveyError::InvalidParcelData { .. })));
    }

    #[test]
    fn test_record_rejects_bad_area() {
        let boundary = vec![Coordinate {
            lat: 55.7558,
            lon: 37.6173,
        }];
        let err = ParcelRecord::new(
            number(),
            "ул. Ленина, 1".to_string(),
            0.0,
            "Земли населённых пунктов".to_string(),
            boundary,
        );
        assert!(matches!(err, Err(SurveyError::InvalidArea { .. })));
    }

    #[test]
    fn test_record_derives_estimate() {
        let boundary = vec![
            Coordinate {
                lat: 55.7558,
                lon: 37.6173,
            },
            Coordinate {
                lat: 55.7548,
                lon: 37.6193,
            },
        ];
        let record = ParcelRecord::new(
            number(),
            "ул. Ленина, 1".to_string(),
            1000.0,
            "Земли населённых пунктов".to_string(),
            boundary,
        )
        .expect("record builds");
        assert_eq!(record.estimate.points_count, 9);
        assert_eq!(record.estimate.total_cost, 40_500);
    }

    #[test]
    fn test_record_json_shape() {
        let record = ParcelRecord::new(
            number(),
            "адрес".to_string(),
            1000.0,
            "категория".to_string(),
            vec![Coordinate {
                lat: 55.7558,
                lon: 37.6173,
            }],
        )
        .expect("record builds");

        let json = serde_json::to_value(&record).expect("serializes");
        assert_eq!(json["cadastralNumber"], "77:09:0005004:1234");
        assert_eq!(json["pointsCount"], 9);
        assert_eq!(json["costPerPoint"], 4500);
        assert_eq!(json["totalCost"], 40_500);
        assert_eq!(json["coordinates"][0][0], 55.7558);
        assert_eq!(json["coordinates"][0][1], 37.6173);
    }
}
