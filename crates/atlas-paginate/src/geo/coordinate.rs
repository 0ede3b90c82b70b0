//! Geographic coordinate with great-circle helpers
//!
//! Degrees are the canonical representation. The radian values are a cache
//! that is refreshed every time a degree value is set, so both always agree.

use std::fmt;

use crate::types::LengthUnit;

/// A point on the earth in longitude and latitude
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
    lon_rad: f64,
    lat_rad: f64,
}

impl Coordinate {
    /// Create a coordinate from degrees
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            lon_rad: lon.to_radians(),
            lat_rad: lat.to_radians(),
        }
    }

    /// Create a coordinate from radians
    pub fn from_radians(lon_rad: f64, lat_rad: f64) -> Self {
        Self::new(lon_rad.to_degrees(), lat_rad.to_degrees())
    }

    /// Longitude in degrees
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in degrees
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in radians
    #[inline]
    pub fn lon_radians(&self) -> f64 {
        self.lon_rad
    }

    /// Latitude in radians
    #[inline]
    pub fn lat_radians(&self) -> f64 {
        self.lat_rad
    }

    pub fn set_lon(&mut self, lon: f64) {
        self.lon = lon;
        self.lon_rad = lon.to_radians();
    }

    pub fn set_lat(&mut self, lat: f64) {
        self.lat = lat;
        self.lat_rad = lat.to_radians();
    }

    /// Initial bearing from `self` towards `other`, in radians
    ///
    /// Returns 0 when both coordinates coincide.
    pub fn bearing(&self, other: &Coordinate) -> f64 {
        let d_lon = other.lon_rad - self.lon_rad;

        let y = d_lon.sin() * other.lat_rad.cos();
        let x = self.lat_rad.cos() * other.lat_rad.sin()
            - self.lat_rad.sin() * other.lat_rad.cos() * d_lon.cos();
        y.atan2(x)
    }

    /// Great-circle distance to `other` using the haversine formula
    pub fn distance(&self, other: &Coordinate, unit: LengthUnit) -> f64 {
        let d_lat = other.lat_rad - self.lat_rad;
        let d_lon = other.lon_rad - self.lon_rad;

        let a = (d_lat / 2.0).sin().powi(2)
            + (d_lon / 2.0).sin().powi(2) * self.lat_rad.cos() * other.lat_rad.cos();
        // Rounding can push `a` a hair above 1 for antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        unit.earth_radius() * c
    }

    /// The point at `distance` from `self` on the great circle towards `target`
    pub fn destination_point(&self, target: &Coordinate, distance: f64, unit: LengthUnit) -> Self {
        let bearing = self.bearing(target);
        let angular = distance / unit.earth_radius();

        let lat_rad = (self.lat_rad.sin() * angular.cos()
            + self.lat_rad.cos() * angular.sin() * bearing.cos())
        .asin();
        let lon_rad = self.lon_rad
            + (bearing.sin() * angular.sin() * self.lat_rad.cos())
                .atan2(angular.cos() - self.lat_rad.sin() * lat_rad.sin());

        Self::from_radians(lon_rad, lat_rad)
    }
}

/// Exact comparison of the degree values
impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lon == other.lon && self.lat == other.lat
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", round6(self.lon), round6(self.lat))
    }
}

fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(coord: Coordinate) -> Self {
        geo_types::Point::new(coord.lon, coord.lat)
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(point: geo_types::Point<f64>) -> Self {
        Coordinate::new(point.x(), point.y())
    }
}
