use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default proximity warning threshold in meters.
pub const DEFAULT_WARN_THRESHOLD_M: f64 = 500.0;

pub const FAR_FROM_CLIENT_MSG: &str = "You are far from the client location";

/// A GPS position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    #[schema(example = 28.4946)]
    pub latitude: f64,

    #[schema(example = 77.0887)]
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Finite and within latitude [-90, 90], longitude [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance between two coordinates (Haversine formula).
///
/// Returns kilometers, rounded to 2 decimal places. Out-of-range inputs are
/// the caller's responsibility; any finite pair produces a finite result.
pub fn calculate_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    // rounding can push h a few ulps above 1 near antipodal points,
    // which would make sqrt(1 - h) NaN
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2))
    .min(1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    (EARTH_RADIUS_KM * c * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceWarning {
    pub should_warn: bool,
    pub message: Option<&'static str>,
}

/// Decide whether a distance (km) is far enough from the client to warn.
///
/// The comparison is strict: a distance of exactly `threshold_m` meters does
/// NOT warn. `threshold_m` defaults to [`DEFAULT_WARN_THRESHOLD_M`].
pub fn check_distance_warning(distance_km: f64, threshold_m: Option<f64>) -> DistanceWarning {
    let threshold_m = threshold_m.unwrap_or(DEFAULT_WARN_THRESHOLD_M);
    let distance_m = distance_km * 1000.0;

    if distance_m > threshold_m {
        DistanceWarning {
            should_warn: true,
            message: Some(FAR_FROM_CLIENT_MSG),
        }
    } else {
        DistanceWarning {
            should_warn: false,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CYBER_CITY: Coordinate = Coordinate {
        latitude: 28.4946,
        longitude: 77.0887,
    };
    const SECTOR_44: Coordinate = Coordinate {
        latitude: 28.4595,
        longitude: 77.0266,
    };

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            calculate_distance(CYBER_CITY, SECTOR_44),
            calculate_distance(SECTOR_44, CYBER_CITY)
        );
    }

    #[test]
    fn identical_coordinates_give_zero() {
        assert_eq!(calculate_distance(CYBER_CITY, CYBER_CITY), 0.0);
    }

    #[test]
    fn known_gurugram_distance() {
        let d = calculate_distance(CYBER_CITY, SECTOR_44);
        assert!((d - 7.22).abs() < 0.1, "got {d}");
    }

    #[test]
    fn one_degree_of_longitude_is_positive() {
        assert!(calculate_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)) > 0.0);
    }

    #[test]
    fn rounded_to_two_decimals() {
        let d = calculate_distance(CYBER_CITY, SECTOR_44);
        assert_eq!(d, (d * 100.0).round() / 100.0);
    }

    #[test]
    fn handles_negative_coordinates_and_poles() {
        let d = calculate_distance(Coordinate::new(-33.8688, 151.2093), Coordinate::new(90.0, 0.0));
        assert!(d > 0.0 && d.is_finite());

        let d = calculate_distance(Coordinate::new(-90.0, 0.0), Coordinate::new(90.0, 0.0));
        // pole to pole, half the circumference
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let d = calculate_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - EARTH_RADIUS_KM * std::f64::consts::PI).abs() < 1.0);

        // near-antipodal pairs, where h can land a few ulps above 1
        for i in 0..90 {
            let lat = f64::from(i);
            let d = calculate_distance(
                Coordinate::new(lat, 77.0887),
                Coordinate::new(-lat, 77.0887 - 180.0),
            );
            assert!(d.is_finite(), "NaN at latitude {lat}");
            assert!(d > 19_000.0, "got {d} at latitude {lat}");
        }
    }

    #[test]
    fn coordinate_validation() {
        assert!(Coordinate::new(28.49, 77.08).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn warns_beyond_default_threshold() {
        let w = check_distance_warning(0.6, None);
        assert!(w.should_warn);
        assert!(w.message.unwrap().contains("far from"));
    }

    #[test]
    fn exactly_500m_does_not_warn() {
        let w = check_distance_warning(0.5, None);
        assert!(!w.should_warn);
        assert_eq!(w.message, None);
    }

    #[test]
    fn just_over_500m_warns() {
        assert!(check_distance_warning(0.501, None).should_warn);
    }

    #[test]
    fn custom_threshold() {
        assert!(check_distance_warning(0.3, Some(200.0)).should_warn);
        assert!(!check_distance_warning(0.3, Some(300.0)).should_warn);
    }
}
