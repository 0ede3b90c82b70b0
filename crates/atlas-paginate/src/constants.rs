//! Shared constants for page calculation
//!
//! This module centralizes magic numbers and constants used throughout
//! the pagination process.

// =============================================================================
// Earth Model
// =============================================================================

/// Average circumference of the earth in km.
///
/// Neither the equatorial (40075.017 km) nor the meridional (40007.86 km)
/// value; the average keeps page extents identical to earlier releases.
pub const EARTH_CIRCUMFERENCE_KM: f64 = 40041.44;

/// Kilometers covered by one degree of latitude
pub const KM_PER_DEGREE: f64 = EARTH_CIRCUMFERENCE_KM / 360.0;

/// Mean earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Mean earth radius in statute miles
pub const EARTH_RADIUS_MI: f64 = 3959.0;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Centimeters per kilometer
pub const CM_PER_KM: f64 = 100000.0;

/// Convert a length on paper in cm to a ground length in km at `scale`
#[inline]
pub fn paper_cm_to_ground_km(length_cm: f64, scale: f64) -> f64 {
    length_cm / CM_PER_KM * scale
}

// =============================================================================
// Default Page Settings
// =============================================================================

/// Default scale denominator (1:50000)
pub const DEFAULT_SCALE: f64 = 50000.0;

/// Default page width in cm (A4 minus printer margin)
pub const DEFAULT_PAGE_WIDTH_CM: f64 = 20.0;

/// Default page height in cm (A4 minus printer margin)
pub const DEFAULT_PAGE_HEIGHT_CM: f64 = 28.7;

/// Default overlap between adjacent pages in cm
pub const DEFAULT_PAGE_OVERLAP_CM: f64 = 1.0;

/// Default distance between two distance markers
pub const DEFAULT_WAYPOINT_INTERVAL: f64 = 1.0;

/// Default output basename, the page position and extension are appended
pub const DEFAULT_OUTPUT_BASENAME: &str = "detail.";

/// Default external render command
pub const DEFAULT_RENDER_COMMAND: &str = "hm-render-mapnik";

// =============================================================================
// Track Order Search
// =============================================================================

/// Above this track count only the input order is evaluated (6! = 720)
pub const MAX_TRACKS_PERMUTATION: usize = 6;

// =============================================================================
// Imposition
// =============================================================================

/// Pages per folded sheet in book order
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// GPX Output
// =============================================================================

/// Creator attribute written to generated GPX files
pub const GPX_CREATOR: &str = "atlas-paginate";

/// File name of the overview written by a debug dump
pub const DEBUG_OVERVIEW_FILE: &str = "debug_overview.gpx";

/// Basename passed to the renderer in the debug reproducer command
pub const DEBUG_OVERVIEW_BASENAME: &str = "debug_overview";
