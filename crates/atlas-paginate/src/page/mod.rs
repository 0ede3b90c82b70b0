//! Pages: incremental fitting, finished pages and the overview

mod artifact;
mod builder;
mod overview;
#[allow(clippy::module_inception)]
mod page;

pub use artifact::{overview_gpx, write_overview, write_overview_tempfile};
pub use builder::PageBuilder;
pub use overview::{OverviewBuilder, build_overview};
pub use page::Page;

use crate::geo::{Coordinate, Extent};
use crate::types::*;

fn border_point(extent: &Extent, prev: &Coordinate, coord: &Coordinate) -> Result<Coordinate> {
    extent.border_crossing(prev, coord).ok_or_else(|| {
        AtlasError::Geometry(format!(
            "no border crossing between {} and {} for page area {}",
            prev, coord, extent
        ))
    })
}
