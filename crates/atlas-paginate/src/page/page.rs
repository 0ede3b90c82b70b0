use std::fmt;

use crate::geo::{Coordinate, Extent};
use crate::types::*;

/// A finished page: fixed extent, orientation and scale
///
/// Index 0 is the overview page, detail pages are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub(crate) index: usize,
    pub(crate) orientation: Orientation,
    pub(crate) scale: f64,
    pub(crate) page_size: PageSize,
    pub(crate) overlap_cm: f64,
    pub(crate) extent: Extent,
    pub(crate) track_extent: Extent,
}

impl Page {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_overview(&self) -> bool {
        self.index == 0
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Scale denominator
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn overlap_cm(&self) -> f64 {
        self.overlap_cm
    }

    /// Paper width in cm with the orientation applied
    pub fn page_width_cm(&self) -> f64 {
        self.page_size.dimensions_with_orientation(self.orientation).0
    }

    /// Paper height in cm with the orientation applied
    pub fn page_height_cm(&self) -> f64 {
        self.page_size.dimensions_with_orientation(self.orientation).1
    }

    /// Render extent
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Extent of the track points assigned to this page. For the overview
    /// this is the union of all detail page extents.
    pub fn track_extent(&self) -> Extent {
        self.track_extent
    }

    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.extent.contains(coord)
    }

    /// Point where the segment `prev -> coord` leaves this page
    pub fn calc_border_point(&self, prev: &Coordinate, coord: &Coordinate) -> Result<Coordinate> {
        super::border_point(&self.extent, prev, coord)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overview() {
            write!(
                f,
                "overview map ({}): {}, scale = 1:{}",
                self.orientation,
                self.extent,
                self.scale.round() as i64
            )
        } else {
            write!(
                f,
                "detail map {} ({}): {}",
                self.index, self.orientation, self.extent
            )
        }
    }
}
