use crate::domain::model::CostEstimate;
use crate::utils::error::{Result, SurveyError};

/// One survey point covers up to this much parcel area; any started slice
/// requires a full extra point.
const AREA_PER_POINT_SQ_M: f64 = 200.0;

/// Corner/reference points staked regardless of area.
const BASE_POINTS: u32 = 4;

/// Per-point rates in rubles. Larger parcels get a cheaper rate, with the
/// thresholds compared strictly: a parcel of exactly 10 000 m² is billed at
/// the mid tier, exactly 5 000 m² at the small tier.
const LARGE_PARCEL_THRESHOLD_SQ_M: f64 = 10_000.0;
const MID_PARCEL_THRESHOLD_SQ_M: f64 = 5_000.0;
const RATE_LARGE: u32 = 3_500;
const RATE_MID: u32 = 4_000;
const RATE_SMALL: u32 = 4_500;

/// Derives the survey pricing for a parcel of `area_sq_m` square meters.
///
/// Pure and deterministic. The area must be finite and positive; anything
/// else is rejected rather than producing a nonsense estimate.
pub fn estimate(area_sq_m: f64) -> Result<CostEstimate> {
    if !area_sq_m.is_finite() || area_sq_m <= 0.0 {
        return Err(SurveyError::InvalidArea { value: area_sq_m });
    }

    let points_count = (area_sq_m / AREA_PER_POINT_SQ_M).ceil() as u32 + BASE_POINTS;

    let cost_per_point = if area_sq_m > LARGE_PARCEL_THRESHOLD_SQ_M {
        RATE_LARGE
    } else if area_sq_m > MID_PARCEL_THRESHOLD_SQ_M {
        RATE_MID
    } else {
        RATE_SMALL
    };

    let total_cost = u64::from(points_count) * u64::from(cost_per_point);

    Ok(CostEstimate {
        points_count,
        cost_per_point,
        total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_parcel() {
        let e = estimate(1000.0).expect("valid area");
        assert_eq!(e.points_count, 9);
        assert_eq!(e.cost_per_point, 4_500);
        assert_eq!(e.total_cost, 40_500);
    }

    #[test]
    fn test_mid_parcel() {
        let e = estimate(6000.0).expect("valid area");
        assert_eq!(e.points_count, 34);
        assert_eq!(e.cost_per_point, 4_000);
        assert_eq!(e.total_cost, 136_000);
    }

    #[test]
    fn test_large_parcel() {
        let e = estimate(12_000.0).expect("valid area");
        assert_eq!(e.points_count, 64);
        assert_eq!(e.cost_per_point, 3_500);
        assert_eq!(e.total_cost, 224_000);
    }

    #[test]
    fn test_tier_thresholds_are_strict() {
        // Exactly on a threshold falls into the cheaper-rate-for-buyer tier below it.
        assert_eq!(estimate(10_000.0).expect("valid").cost_per_point, 4_000);
        assert_eq!(estimate(5_000.0).expect("valid").cost_per_point, 4_500);
        assert_eq!(estimate(10_000.5).expect("valid").cost_per_point, 3_500);
        assert_eq!(estimate(5_000.5).expect("valid").cost_per_point, 4_000);
    }

    #[test]
    fn test_fractional_area_rounds_up() {
        // 201 m² needs two slices of 200 m².
        let e = estimate(201.0).expect("valid area");
        assert_eq!(e.points_count, 6);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate(7_777.5).expect("valid area");
        let b = estimate(7_777.5).expect("valid area");
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert!(matches!(
            estimate(0.0),
            Err(SurveyError::InvalidArea { .. })
        ));
        assert!(matches!(
            estimate(-12.0),
            Err(SurveyError::InvalidArea { .. })
        ));
        assert!(matches!(
            estimate(f64::NAN),
            Err(SurveyError::InvalidArea { .. })
        ));
        assert!(matches!(
            estimate(f64::INFINITY),
            Err(SurveyError::InvalidArea { .. })
        ));
    }

    #[test]
    fn test_total_is_product_of_parts() {
        for area in [1.0, 199.9, 200.0, 4_999.0, 5_001.0, 9_999.0, 50_000.0] {
            let e = estimate(area).expect("valid area");
            assert_eq!(
                e.total_cost,
                u64::from(e.points_count) * u64::from(e.cost_per_point)
            );
        }
    }
}
