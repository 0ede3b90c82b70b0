//! Single pass over one track order
//!
//! Points already covered by a finished page are skipped. Every other point
//! goes to the open page; when it does not fit, the page is closed at the
//! point where the track leaves it and the next page starts there.

use log::{debug, error};

use crate::constants::{DEBUG_OVERVIEW_BASENAME, DEBUG_OVERVIEW_FILE};
use crate::geo::Coordinate;
use crate::options::PaginationOptions;
use crate::page::{Page, PageBuilder, build_overview, write_overview};
use crate::tracks::Track;
use crate::types::*;

/// Partition state for one track order
pub(crate) struct TrackFinder<'a> {
    options: &'a PaginationOptions,
    pages: Vec<Page>,
    current: Option<PageBuilder>,
    next_index: usize,
    point_skipped: bool,
}

impl<'a> TrackFinder<'a> {
    pub(crate) fn new(options: &'a PaginationOptions) -> Self {
        Self {
            options,
            pages: Vec::new(),
            current: None,
            next_index: 1,
            point_skipped: true,
        }
    }

    /// Paginate `tracks` in the given order
    ///
    /// On failure in debug mode the pages found so far are dumped before the
    /// error is returned.
    pub(crate) fn run(mut self, tracks: &[&Track]) -> Result<Vec<Page>> {
        match self.add_tracks(tracks) {
            Ok(()) => Ok(self.pages),
            Err(e) => {
                if self.options.debug {
                    let order: Vec<String> = tracks.iter().map(|track| track.describe()).collect();
                    error!("Error while calculating track order {}", order.join(" // "));
                    self.debug_dump();
                }
                Err(e)
            }
        }
    }

    fn add_tracks(&mut self, tracks: &[&Track]) -> Result<()> {
        for track in tracks {
            self.point_skipped = true;
            let mut prev = None;
            for &coord in track.points() {
                self.add_point(prev, coord)?;
                prev = Some(coord);
            }
            self.flush();
        }
        Ok(())
    }

    fn add_point(&mut self, prev: Option<Coordinate>, coord: Coordinate) -> Result<()> {
        if self.is_rendered(&coord) {
            self.point_skipped = true;
            return Ok(());
        }

        if self.current.is_none() {
            self.open_page(coord);
        } else {
            self.place_point(prev, coord)?;
        }
        self.point_skipped = false;
        Ok(())
    }

    fn is_rendered(&self, coord: &Coordinate) -> bool {
        self.pages.iter().any(|page| page.contains(coord))
    }

    fn open_page(&mut self, coord: Coordinate) {
        self.current = Some(PageBuilder::start(self.next_index, self.options, coord));
        self.next_index += 1;
    }

    /// Center the open page and move it to the finished pages
    fn flush(&mut self) {
        if let Some(builder) = self.current.take() {
            let page = builder.finish();
            debug!("{}", page);
            self.pages.push(page);
        }
    }

    /// Add `coord` to the open page, splitting it over new pages for as long
    /// as it does not fit
    fn place_point(&mut self, prev: Option<Coordinate>, coord: Coordinate) -> Result<()> {
        let mut anchor = prev;
        let mut skipped = self.point_skipped;

        loop {
            let Some(page) = self.current.as_mut() else {
                self.open_page(coord);
                return Ok(());
            };
            if !page.add_next_point(coord) {
                return Ok(());
            }
            page.remove_last_point();

            if !skipped {
                let from = anchor.ok_or_else(|| {
                    AtlasError::Geometry(format!("no previous point before {}", coord))
                })?;
                let border = self
                    .closest_border_point(&from, &coord, true)?
                    .ok_or_else(|| {
                        AtlasError::Geometry(format!(
                            "no border crossing between {} and {}",
                            from, coord
                        ))
                    })?;
                if let Some(page) = self.current.as_mut() {
                    page.add_next_point(border);
                }
                self.flush();

                if border == from {
                    return Err(AtlasError::Geometry(format!(
                        "page split at {} makes no progress towards {}",
                        border, coord
                    )));
                }
                self.open_page(border);
                anchor = Some(border);
            } else {
                self.flush();

                let border = match anchor {
                    Some(from) => self.closest_border_point(&from, &coord, false)?,
                    None => None,
                };
                match border {
                    Some(border) => {
                        self.open_page(border);
                        anchor = Some(border);
                        skipped = false;
                    }
                    None => {
                        self.open_page(coord);
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Border crossing of `prev -> coord` closest to `coord`
    ///
    /// Candidates come from every finished page containing `prev` but not
    /// `coord`, plus the open page when `include_current` is set.
    fn closest_border_point(
        &self,
        prev: &Coordinate,
        coord: &Coordinate,
        include_current: bool,
    ) -> Result<Option<Coordinate>> {
        let mut candidates = Vec::new();
        for page in &self.pages {
            if page.contains(prev) && !page.contains(coord) {
                candidates.push(page.calc_border_point(prev, coord)?);
            }
        }
        if include_current {
            if let Some(page) = &self.current {
                candidates.push(page.calc_border_point(prev, coord)?);
            }
        }

        let closest = candidates.into_iter().min_by(|a, b| {
            coord
                .distance(a, LengthUnit::Km)
                .total_cmp(&coord.distance(b, LengthUnit::Km))
        });
        Ok(closest)
    }

    /// Log the pages found so far and write a debug overview
    fn debug_dump(&self) {
        for page in &self.pages {
            error!("{}", page);
        }

        let Some(overview) = build_overview(&self.pages, self.options) else {
            error!("No pages were calculated before the error");
            return;
        };

        if let Err(e) = write_overview(&self.pages, DEBUG_OVERVIEW_FILE) {
            error!("Failed to write {}: {}", DEBUG_OVERVIEW_FILE, e);
            return;
        }

        let extent = overview.extent();
        error!("A debug overview map can be generated by running:");
        error!(
            "[rendercommand] --pagewidth {:.2} --pageheight {:.2} -b {} -t {} -v [renderoptions] [gpxfiles] bbox -o {:.15} -a {:.15} -O {:.15} -A {:.15}",
            self.options.page_size.width_cm,
            self.options.page_size.height_cm,
            DEBUG_OVERVIEW_BASENAME,
            DEBUG_OVERVIEW_FILE,
            extent.min_lon(),
            extent.min_lat(),
            extent.max_lon(),
            extent.max_lat()
        );
    }
}
