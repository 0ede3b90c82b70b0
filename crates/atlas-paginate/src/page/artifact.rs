//! GPX file tracing the outline of every detail page
//!
//! The renderer draws this file on the overview page so the reader can see
//! where each detail page sits.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use tempfile::NamedTempFile;

use super::Page;
use crate::constants::GPX_CREATOR;
use crate::geo::Coordinate;
use crate::types::*;

/// Build the overview document: one closed rectangle per detail page
pub fn overview_gpx(pages: &[Page]) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(GPX_CREATOR.to_string()),
        ..Default::default()
    };

    for page in pages.iter().filter(|page| !page.is_overview()) {
        let extent = page.extent();
        let corners = [
            (extent.min_lon(), extent.max_lat()),
            (extent.max_lon(), extent.max_lat()),
            (extent.max_lon(), extent.min_lat()),
            (extent.min_lon(), extent.min_lat()),
            (extent.min_lon(), extent.max_lat()),
        ];

        let mut segment = TrackSegment::default();
        segment.points = corners
            .iter()
            .map(|&(lon, lat)| Waypoint::new(Coordinate::new(lon, lat).into()))
            .collect();

        let mut track = Track::default();
        track.name = Some(format!("Page {}", page.index()));
        track.segments.push(segment);
        gpx.tracks.push(track);
    }

    gpx
}

/// Write the overview document for `pages` to `path`
pub fn write_overview(pages: &[Page], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    gpx::write(&overview_gpx(pages), &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write the overview document for `pages` to a temporary file
///
/// The file is removed when the returned handle is dropped.
pub fn write_overview_tempfile(pages: &[Page]) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("atlas_overview")
        .suffix(".gpx")
        .tempfile()?;
    gpx::write(&overview_gpx(pages), file.as_file())?;
    Ok(file)
}
