//! Axis-aligned longitude/latitude rectangle and paper conversions

use std::fmt;

use super::Coordinate;
use crate::constants::{CM_PER_KM, KM_PER_DEGREE, paper_cm_to_ground_km};

/// Rectangle in longitude/latitude space
///
/// Always satisfies `min_lon <= max_lon` and `min_lat <= max_lat`. A
/// zero-size extent is valid and represents a single point.
///
/// # Limitations
///
/// Extents crossing the ±180° meridian are not supported, simple min/max
/// logic is used throughout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

/// Bound of an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Min,
    Max,
}

/// Which bound moved on each axis when an extent was extended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Growth {
    pub lon: Option<Side>,
    pub lat: Option<Side>,
}

impl Extent {
    /// Create an extent spanning two corners, given in any order
    pub fn new(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_lon: a.lon().min(b.lon()),
            min_lat: a.lat().min(b.lat()),
            max_lon: a.lon().max(b.lon()),
            max_lat: a.lat().max(b.lat()),
        }
    }

    /// Create an extent of `width` x `height` degrees around `center`
    pub fn centered(center: Coordinate, width: f64, height: f64) -> Self {
        let min_lon = center.lon() - width / 2.0;
        let min_lat = center.lat() - height / 2.0;
        Self {
            min_lon,
            min_lat,
            max_lon: min_lon + width.abs(),
            max_lat: min_lat + height.abs(),
        }
    }

    /// Create the tight extent around a sequence of coordinates
    ///
    /// Returns `None` if the slice is empty.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let (first, rest) = coords.split_first()?;
        let mut extent = Self::from(*first);
        for &coord in rest {
            extent.extend(coord);
        }
        Some(extent)
    }

    #[inline]
    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    #[inline]
    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    #[inline]
    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    #[inline]
    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Size in degrees longitude
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Size in degrees latitude
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            self.min_lon + self.width() / 2.0,
            self.min_lat + self.height() / 2.0,
        )
    }

    /// Lower-left corner
    pub fn min_corner(&self) -> Coordinate {
        Coordinate::new(self.min_lon, self.min_lat)
    }

    /// Upper-right corner
    pub fn max_corner(&self) -> Coordinate {
        Coordinate::new(self.max_lon, self.max_lat)
    }

    /// Whether `coord` lies inside or on the border of this extent
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.min_lon <= coord.lon()
            && coord.lon() <= self.max_lon
            && self.min_lat <= coord.lat()
            && coord.lat() <= self.max_lat
    }

    /// Extend the extent to include `coord`
    ///
    /// Each axis moves at most one bound; the returned [`Growth`] tells which.
    pub fn extend(&mut self, coord: Coordinate) -> Growth {
        let mut growth = Growth::default();

        if coord.lon() < self.min_lon {
            self.min_lon = coord.lon();
            growth.lon = Some(Side::Min);
        } else if coord.lon() > self.max_lon {
            self.max_lon = coord.lon();
            growth.lon = Some(Side::Max);
        }

        if coord.lat() < self.min_lat {
            self.min_lat = coord.lat();
            growth.lat = Some(Side::Min);
        } else if coord.lat() > self.max_lat {
            self.max_lat = coord.lat();
            growth.lat = Some(Side::Max);
        }

        growth
    }

    /// Merge another extent into this one
    pub fn merge(&mut self, other: &Extent) {
        self.min_lon = self.min_lon.min(other.min_lon);
        self.min_lat = self.min_lat.min(other.min_lat);
        self.max_lon = self.max_lon.max(other.max_lon);
        self.max_lat = self.max_lat.max(other.max_lat);
    }

    /// Replace the longitude span with `[min_lon, min_lon + size]`
    pub(crate) fn with_lon_span(mut self, min_lon: f64, size: f64) -> Self {
        self.min_lon = min_lon;
        self.max_lon = min_lon + size;
        self
    }

    pub(crate) fn with_lat_span(mut self, min_lat: f64, size: f64) -> Self {
        self.min_lat = min_lat;
        self.max_lat = min_lat + size;
        self
    }
}

// =============================================================================
// Border Crossing
// =============================================================================

impl Extent {
    /// Point where the segment `inside -> outside` crosses the border
    ///
    /// Longitude borders are tried first. A longitude hit whose latitude lies
    /// beyond the latitude bounds is replaced by the latitude border crossing
    /// when there is one. Returns `None` when the segment does not cross any
    /// border, which includes segments running parallel to the crossed side.
    pub fn border_crossing(&self, inside: &Coordinate, outside: &Coordinate) -> Option<Coordinate> {
        let lon_hit = if outside.lon() <= self.min_lon && self.min_lon <= inside.lon() {
            intersect_lon(outside, inside, self.min_lon)
        } else {
            None
        }
        .or_else(|| {
            if inside.lon() <= self.max_lon && self.max_lon <= outside.lon() {
                intersect_lon(inside, outside, self.max_lon)
            } else {
                None
            }
        });

        if let Some(hit) = lon_hit {
            if self.min_lat <= hit.lat() && hit.lat() <= self.max_lat {
                return Some(hit);
            }
        }

        let lat_hit = if outside.lat() <= self.min_lat && self.min_lat <= inside.lat() {
            intersect_lat(outside, inside, self.min_lat)
        } else {
            None
        }
        .or_else(|| {
            if inside.lat() <= self.max_lat && self.max_lat <= outside.lat() {
                intersect_lat(inside, outside, self.max_lat)
            } else {
                None
            }
        });

        lat_hit.or(lon_hit)
    }
}

fn intersect_lon(start: &Coordinate, end: &Coordinate, lon: f64) -> Option<Coordinate> {
    if start.lon() == end.lon() {
        return None;
    }
    let lat = (end.lat() - start.lat()) / (end.lon() - start.lon()) * (lon - start.lon()) + start.lat();
    Some(Coordinate::new(lon, lat))
}

fn intersect_lat(start: &Coordinate, end: &Coordinate, lat: f64) -> Option<Coordinate> {
    if start.lat() == end.lat() {
        return None;
    }
    let lon = (lat - start.lat()) * (end.lon() - start.lon()) / (end.lat() - start.lat()) + start.lon();
    Some(Coordinate::new(lon, lat))
}

impl From<Coordinate> for Extent {
    fn from(coord: Coordinate) -> Self {
        Self {
            min_lon: coord.lon(),
            min_lat: coord.lat(),
            max_lon: coord.lon(),
            max_lat: coord.lat(),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min_corner(), self.max_corner())
    }
}

// =============================================================================
// Paper Conversions
// =============================================================================

/// Degrees longitude covered by `length_cm` of paper at `scale`
///
/// Longitude degrees shrink with the cosine of `latitude`.
pub fn cm_to_degrees_lon(length_cm: f64, scale: f64, latitude: f64) -> f64 {
    paper_cm_to_ground_km(length_cm, scale) / (KM_PER_DEGREE * latitude.to_radians().cos())
}

/// Degrees latitude covered by `length_cm` of paper at `scale`
pub fn cm_to_degrees_lat(length_cm: f64, scale: f64) -> f64 {
    paper_cm_to_ground_km(length_cm, scale) / KM_PER_DEGREE
}

/// Ground length in cm of `delta_lon` degrees at `latitude`
pub fn degrees_lon_to_cm(delta_lon: f64, latitude: f64) -> f64 {
    delta_lon * KM_PER_DEGREE * latitude.to_radians().cos() * CM_PER_KM
}

/// Ground length in cm of `delta_lat` degrees
pub fn degrees_lat_to_cm(delta_lat: f64) -> f64 {
    delta_lat * KM_PER_DEGREE * CM_PER_KM
}
