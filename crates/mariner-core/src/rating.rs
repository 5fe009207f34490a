//! Composite route rating engine.
//!
//! Blends a route's distance and weather-risk score into a single 0–100
//! rating under one of three weighting policies. Pure and deterministic;
//! invoked once per route record at import time, with the result stored on
//! the ROUTE edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance ceiling for normalization, in nautical miles.
const MAX_DISTANCE_NM: f64 = 20_000.0;

/// Weighting policy for the composite rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingMethod {
    /// Distance and weather each weigh 50%.
    #[default]
    Balanced,
    /// Distance 70%, weather 30%.
    DistanceWeighted,
    /// Weather 70%, distance 30%.
    WeatherWeighted,
}

impl RatingMethod {
    fn weights(self) -> (f64, f64) {
        match self {
            Self::Balanced => (0.5, 0.5),
            Self::DistanceWeighted => (0.7, 0.3),
            Self::WeatherWeighted => (0.3, 0.7),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::DistanceWeighted => "distance_weighted",
            Self::WeatherWeighted => "weather_weighted",
        }
    }
}

impl fmt::Display for RatingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unrecognized rating method name.
///
/// No default is substituted: an unknown method fails before any edge is
/// written.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown rating method: {0} (expected balanced, distance_weighted, or weather_weighted)")]
pub struct UnknownRatingMethod(pub String);

impl FromStr for RatingMethod {
    type Err = UnknownRatingMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(Self::Balanced),
            "distance_weighted" => Ok(Self::DistanceWeighted),
            "weather_weighted" => Ok(Self::WeatherWeighted),
            other => Err(UnknownRatingMethod(other.to_string())),
        }
    }
}

/// Compute the composite 0–100 rating for a route.
///
/// `distance` is in nautical miles (>= 0) and is normalized against a fixed
/// 20,000 nm ceiling, saturating at 100. `weather_score` is nominally 1–10
/// and is rescaled by 10; out-of-range input is passed through unclamped
/// (a score above 10 yields a scaled value above 100). The weighted sum is
/// rounded to one decimal place.
pub fn rating(distance: f64, weather_score: f64, method: RatingMethod) -> f64 {
    let distance_score = (distance / MAX_DISTANCE_NM * 100.0).min(100.0);
    let weather_scaled = weather_score * 10.0;

    let (wd, ww) = method.weights();
    round1(wd * distance_score + ww * weather_scaled)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_midpoint() {
        assert_eq!(rating(10_000.0, 5.0, RatingMethod::Balanced), 50.0);
    }

    #[test]
    fn test_balanced_ceiling() {
        assert_eq!(rating(20_000.0, 10.0, RatingMethod::Balanced), 100.0);
    }

    #[test]
    fn test_weather_weighted_floor() {
        assert_eq!(rating(0.0, 1.0, RatingMethod::WeatherWeighted), 7.0);
    }

    #[test]
    fn test_distance_saturates_at_ceiling() {
        // Beyond 20,000 nm the distance score stays pinned at 100.
        assert_eq!(
            rating(50_000.0, 10.0, RatingMethod::Balanced),
            rating(20_000.0, 10.0, RatingMethod::Balanced),
        );
    }

    #[test]
    fn test_weather_not_clamped() {
        // weather_score above the nominal band passes through unclamped.
        let inside = rating(0.0, 10.0, RatingMethod::WeatherWeighted);
        let outside = rating(0.0, 12.0, RatingMethod::WeatherWeighted);
        assert!(outside > inside);
        assert_eq!(outside, 84.0);
    }

    #[test]
    fn test_monotonic_in_both_inputs() {
        for method in [
            RatingMethod::Balanced,
            RatingMethod::DistanceWeighted,
            RatingMethod::WeatherWeighted,
        ] {
            let mut prev = 0.0;
            for d in (0..=20_000).step_by(2_000) {
                let r = rating(d as f64, 5.0, method);
                assert!(r >= prev, "{method}: rating decreased at distance {d}");
                prev = r;
            }

            let mut prev = 0.0;
            for w in 1..=10 {
                let r = rating(5_000.0, w as f64, method);
                assert!(r >= prev, "{method}: rating decreased at weather {w}");
                prev = r;
            }
        }
    }

    #[test]
    fn test_method_parse_roundtrip() {
        for s in ["balanced", "distance_weighted", "weather_weighted"] {
            let method: RatingMethod = s.parse().unwrap();
            assert_eq!(method.as_str(), s);
        }
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = "invalid".parse::<RatingMethod>().unwrap_err();
        assert!(err.to_string().contains("invalid"));
    }
}
