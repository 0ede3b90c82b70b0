use super::Page;
use crate::geo::{Extent, cm_to_degrees_lat, cm_to_degrees_lon, degrees_lat_to_cm, degrees_lon_to_cm};
use crate::options::PaginationOptions;
use crate::types::*;

/// Accumulates detail pages into a single overview page
///
/// Orientation and scale are recomputed after every page so the union of
/// all page extents fits on one sheet, overlap margin excluded.
#[derive(Debug, Clone)]
pub struct OverviewBuilder {
    page_size: PageSize,
    overlap_cm: f64,
    scale: f64,
    orientation: Orientation,
    extent: Option<Extent>,
}

impl OverviewBuilder {
    pub fn new(options: &PaginationOptions) -> Self {
        Self {
            page_size: options.page_size,
            overlap_cm: options.page_overlap_cm,
            scale: options.scale,
            orientation: Orientation::Unknown,
            extent: None,
        }
    }

    /// Fold the render extent of `page` into the overview
    pub fn add_page_to_overview(&mut self, page: &Page) {
        let extent = match self.extent.as_mut() {
            Some(extent) => {
                extent.merge(&page.extent());
                *extent
            }
            None => *self.extent.insert(page.extent()),
        };

        self.orientation = if extent.width() < extent.height() {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        };

        let (width, height) = self.page_size.dimensions_with_orientation(self.orientation);
        let scale_lon =
            degrees_lon_to_cm(extent.width(), extent.min_lat()) / (width - self.overlap_cm);
        let scale_lat = degrees_lat_to_cm(extent.height()) / (height - self.overlap_cm);
        self.scale = scale_lon.max(scale_lat);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Center the overview on the folded pages
    ///
    /// Returns `None` when no page was added.
    pub fn finish(self) -> Option<Page> {
        let extent = self.extent?;
        let (width, height) = self.page_size.dimensions_with_orientation(self.orientation);
        let lon = cm_to_degrees_lon(width, self.scale, extent.min_lat());
        let lat = cm_to_degrees_lat(height, self.scale);

        Some(Page {
            index: 0,
            orientation: self.orientation,
            scale: self.scale,
            page_size: self.page_size,
            overlap_cm: self.overlap_cm,
            extent: Extent::centered(extent.center(), lon, lat),
            track_extent: extent,
        })
    }
}

/// Build the overview page for `pages` in the given order
pub fn build_overview(pages: &[Page], options: &PaginationOptions) -> Option<Page> {
    let mut overview = OverviewBuilder::new(options);
    for page in pages.iter().filter(|page| !page.is_overview()) {
        overview.add_page_to_overview(page);
    }
    overview.finish()
}
