use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

use crate::problem::kilometers::Kilometers;

/// A geographic coordinate. Stored as a `geo::Point` with x = longitude and
/// y = latitude, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    /// Great-circle distance. Callers are expected to pass coordinates within
    /// the usual lat/lon bounds; out-of-range values propagate as NaN.
    pub fn haversine_distance(&self, to: &Location) -> Kilometers {
        let haversine = Haversine;

        Kilometers::new(haversine.distance(self.point, to.point) / 1000.0)
    }

    /// Arithmetic mean of a non-empty set of coordinates.
    pub fn centroid_of<'a, I>(locations: I) -> Option<Location>
    where
        I: IntoIterator<Item = &'a Location>,
    {
        let mut count = 0usize;
        let (mut lat_sum, mut lon_sum) = (0.0, 0.0);

        for location in locations {
            lat_sum += location.lat();
            lon_sum += location.lon();
            count += 1;
        }

        if count == 0 {
            return None;
        }

        Some(Location::from_lat_lon(
            lat_sum / count as f64,
            lon_sum / count as f64,
        ))
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Location::from_lat_lon(48.8566, 2.3522);
        let b = Location::from_lat_lon(45.7640, 4.8357);

        let ab = a.haversine_distance(&b);
        let ba = b.haversine_distance(&a);

        assert_eq!(ab, ba);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Location::from_lat_lon(48.8566, 2.3522);

        assert!(a.haversine_distance(&a).is_zero());
    }

    #[test]
    fn paris_to_lyon_is_roughly_392_km() {
        let paris = Location::from_lat_lon(48.8566, 2.3522);
        let lyon = Location::from_lat_lon(45.7640, 4.8357);

        let distance = paris.haversine_distance(&lyon);

        assert!((distance.value() - 392.0).abs() < 5.0);
    }

    #[test]
    fn centroid_is_the_coordinate_mean() {
        let locations = [
            Location::from_lat_lon(0.0, 0.0),
            Location::from_lat_lon(2.0, 4.0),
        ];

        let centroid = Location::centroid_of(locations.iter()).unwrap();

        assert_eq!(centroid.lat(), 1.0);
        assert_eq!(centroid.lon(), 2.0);

        assert!(Location::centroid_of(std::iter::empty::<&Location>()).is_none());
    }
}
