//! Incremental page fitting
//!
//! A [`PageBuilder`] absorbs track points one at a time. It keeps two
//! rectangles: the covered extent (tight box around the accepted points) and
//! the render extent (where the paper currently sits). The render extent is
//! anchored on the side the covered extent last grew towards, so the paper
//! slides along with the track until a point no longer fits.
//!
//! The footprint in degrees depends on the latitude the page sits at. It is
//! measured when the orientation changes and again when the page is centered,
//! never while the render extent slides.

use super::Page;
use crate::geo::{Coordinate, Extent, Growth, Side, cm_to_degrees_lat, cm_to_degrees_lon};
use crate::options::PaginationOptions;
use crate::types::*;

/// A detail page that is still accepting points
#[derive(Debug, Clone)]
pub struct PageBuilder {
    index: usize,
    scale: f64,
    page_size: PageSize,
    overlap_cm: f64,
    debug: bool,
    orientation: Orientation,
    /// Degrees a track may span, overlap excluded
    capacity: (f64, f64),
    /// Degrees covered by the whole sheet
    full: (f64, f64),
    bounds: Extent,
    track: Extent,
    growth: Growth,
    previous: (Extent, Growth),
}

impl PageBuilder {
    /// Open page `index` seeded with its first point
    pub fn start(index: usize, options: &PaginationOptions, first: Coordinate) -> Self {
        let mut builder = Self {
            index,
            scale: options.scale,
            page_size: options.page_size,
            overlap_cm: options.page_overlap_cm,
            debug: options.debug,
            orientation: Orientation::Unknown,
            capacity: (0.0, 0.0),
            full: (0.0, 0.0),
            bounds: Extent::from(first),
            track: Extent::from(first),
            growth: Growth::default(),
            previous: (Extent::from(first), Growth::default()),
        };
        builder.initialize_first_point(first);
        builder
    }

    /// Reset the page to cover only `coord`
    pub fn initialize_first_point(&mut self, coord: Coordinate) {
        self.track = Extent::from(coord);
        self.growth = Growth::default();
        self.previous = (self.track, self.growth);
        self.bounds = self.track;
        self.set_orientation(Orientation::Unknown, coord.lat());
        self.anchor();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current render extent
    pub fn bounds(&self) -> Extent {
        self.bounds
    }

    /// Tight extent around the accepted points
    pub fn track_extent(&self) -> Extent {
        self.track
    }

    /// Whether `coord` lies inside the current render extent
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.bounds.contains(coord)
    }

    /// Add `coord` to the covered extent
    ///
    /// Returns `true` when the covered extent no longer fits on the page. The
    /// point stays accepted until [`remove_last_point`](Self::remove_last_point)
    /// is called.
    pub fn add_next_point(&mut self, coord: Coordinate) -> bool {
        self.previous = (self.track, self.growth);

        let growth = self.track.extend(coord);
        self.growth = Growth {
            lon: growth.lon.or(self.growth.lon),
            lat: growth.lat.or(self.growth.lat),
        };

        let outside = match self.orientation {
            Orientation::Unknown => {
                let latitude = self.bounds.min_lat();
                let portrait_capacity =
                    self.footprint(Orientation::Portrait, self.overlap_cm, latitude);
                let landscape_capacity =
                    self.footprint(Orientation::Landscape, self.overlap_cm, latitude);
                let portrait = excess(&self.track, portrait_capacity);
                let landscape = excess(&self.track, landscape_capacity);

                let orientation = if portrait == 0.0 && landscape == 0.0 {
                    Orientation::Unknown
                } else if portrait <= landscape {
                    Orientation::Portrait
                } else {
                    Orientation::Landscape
                };
                self.set_orientation(orientation, latitude);
                portrait > 0.0 && landscape > 0.0
            }
            _ => excess(&self.track, self.capacity) > 0.0,
        };

        self.anchor();
        outside
    }

    /// Undo the last [`add_next_point`](Self::add_next_point)
    ///
    /// Only the covered extent is restored. The render extent keeps the
    /// position computed for the rejected point, which is the extent the
    /// border crossing has to be calculated against.
    pub fn remove_last_point(&mut self) {
        (self.track, self.growth) = self.previous;
    }

    /// Point where the segment `prev -> coord` leaves the render extent
    pub fn calc_border_point(&self, prev: &Coordinate, coord: &Coordinate) -> Result<Coordinate> {
        if self.debug {
            if !self.bounds.contains(prev) {
                return Err(AtlasError::Geometry(format!(
                    "previous point {} is not inside page area {}",
                    prev, self.bounds
                )));
            }
            if self.bounds.contains(coord) {
                return Err(AtlasError::Geometry(format!(
                    "point {} is not outside page area {}",
                    coord, self.bounds
                )));
            }
        }

        super::border_point(&self.bounds, prev, coord)
    }

    /// Center the render extent on the covered extent, sized to the full page
    pub fn center_map(&mut self) {
        self.set_orientation(self.orientation, self.track.min_lat());
        let (lon, lat) = self.full;
        self.bounds = Extent::centered(self.track.center(), lon, lat);
    }

    /// Center the page and freeze it
    pub fn finish(mut self) -> Page {
        self.center_map();
        Page {
            index: self.index,
            orientation: self.orientation,
            scale: self.scale,
            page_size: self.page_size,
            overlap_cm: self.overlap_cm,
            extent: self.bounds,
            track_extent: self.track,
        }
    }

    /// Switch to `orientation` and measure both footprints at `latitude`
    fn set_orientation(&mut self, orientation: Orientation, latitude: f64) {
        self.orientation = orientation;
        self.capacity = self.footprint(orientation, self.overlap_cm, latitude);
        self.full = self.footprint(orientation, 0.0, latitude);
    }

    /// Degrees covered by the page minus `margin_cm`, longitude measured at
    /// `latitude`
    fn footprint(&self, orientation: Orientation, margin_cm: f64, latitude: f64) -> (f64, f64) {
        let (width, height) = self.page_size.dimensions_with_orientation(orientation);
        (
            cm_to_degrees_lon(width - margin_cm, self.scale, latitude),
            cm_to_degrees_lat(height - margin_cm, self.scale),
        )
    }

    /// Slide the render extent along the covered extent
    ///
    /// On each axis the paper starts at the covered bound opposite to the
    /// last growth and extends one capacity towards it. An axis that never
    /// grew keeps the covered extent.
    ///
    /// The extent never shrinks below the points accepted before the last
    /// one.
    fn anchor(&mut self) {
        let (lon_size, lat_size) = self.capacity;
        let (previous, _) = self.previous;
        let lon_size = lon_size.max(previous.width());
        let lat_size = lat_size.max(previous.height());
        let track = self.track;

        let mut bounds = self.bounds;
        bounds = match self.growth.lon {
            Some(Side::Max) => bounds.with_lon_span(track.min_lon(), lon_size),
            Some(Side::Min) => bounds.with_lon_span(track.max_lon() - lon_size, lon_size),
            None => bounds.with_lon_span(track.min_lon(), track.width()),
        };
        bounds = match self.growth.lat {
            Some(Side::Max) => bounds.with_lat_span(track.min_lat(), lat_size),
            Some(Side::Min) => bounds.with_lat_span(track.max_lat() - lat_size, lat_size),
            None => bounds.with_lat_span(track.min_lat(), track.height()),
        };
        self.bounds = bounds;
    }
}

/// Area of the covered extent sticking out of a page of `capacity` degrees
///
/// A covered extent without height or width has no area, its overflow is
/// then measured by the overshoot in degrees so a straight east-west or
/// north-south track still overflows.
fn excess(track: &Extent, capacity: (f64, f64)) -> f64 {
    let lon_over = (track.width() - capacity.0).max(0.0);
    let lat_over = (track.height() - capacity.1).max(0.0);

    let area = lon_over * track.height() + lat_over * track.width() - lon_over * lat_over;
    if area > 0.0 {
        area
    } else {
        lon_over + lat_over
    }
}

// =============================================================================
// Tests
// =============================================================================
