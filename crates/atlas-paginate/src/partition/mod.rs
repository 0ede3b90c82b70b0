//! Minimum page count search over track orders

mod finder;
mod permutations;

use log::{info, warn};

use crate::constants::MAX_TRACKS_PERMUTATION;
use crate::options::PaginationOptions;
use crate::page::{Page, build_overview};
use crate::tracks::Track;
use crate::types::*;
use finder::TrackFinder;
use permutations::{Permutations, factorial};

/// Result of the page calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    /// Overview page (if requested) followed by the detail pages
    pub pages: Vec<Page>,
    /// Number of track orders that were paginated
    pub permutations_evaluated: usize,
    /// Whether every track order was tried
    pub exhaustive_search: bool,
    /// Track order that produced `pages`, as indices into the input
    pub best_order: Vec<usize>,
}

impl Atlas {
    pub fn overview(&self) -> Option<&Page> {
        self.pages.first().filter(|page| page.is_overview())
    }

    pub fn detail_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|page| !page.is_overview())
    }

    pub fn detail_page_count(&self) -> usize {
        self.detail_pages().count()
    }
}

/// Calculate the pages covering every track with the fewest detail pages
///
/// With up to [`MAX_TRACKS_PERMUTATION`] tracks every track order is tried
/// and the first order with the lowest page count wins. Larger inputs are
/// paginated in input order only.
pub fn find_pages(tracks: &[Track], options: &PaginationOptions) -> Result<Atlas> {
    options.validate()?;
    if tracks.iter().all(Track::is_empty) {
        return Err(AtlasError::NoTracks);
    }

    let exhaustive_search = tracks.len() <= MAX_TRACKS_PERMUTATION;
    let orders: Box<dyn Iterator<Item = Vec<usize>>> = if exhaustive_search {
        info!("Calculating track order permutation resulting in a minimum amount of pages");
        info!(
            "This may take a while, checking {} track permutations",
            factorial(tracks.len())
        );
        Box::new(Permutations::new(tracks.len()))
    } else {
        warn!(
            "Too many tracks to calculate all track permutations ({} > {})",
            tracks.len(),
            MAX_TRACKS_PERMUTATION
        );
        Box::new(std::iter::once((0..tracks.len()).collect()))
    };

    let mut best: Option<(Vec<usize>, Vec<Page>)> = None;
    let mut permutations_evaluated = 0;
    for order in orders {
        let ordered: Vec<&Track> = order.iter().map(|&index| &tracks[index]).collect();
        let pages = TrackFinder::new(options).run(&ordered)?;
        permutations_evaluated += 1;

        let improves = best
            .as_ref()
            .is_none_or(|(_, best_pages)| pages.len() < best_pages.len());
        if improves {
            info!("Found track permutation with {} pages", pages.len());
            best = Some((order, pages));
        }
    }

    let (best_order, mut pages) = best.ok_or(AtlasError::NoTracks)?;

    if options.overview {
        if let Some(overview) = build_overview(&pages, options) {
            info!("{}", overview);
            pages.insert(0, overview);
        }
    }

    Ok(Atlas {
        pages,
        permutations_evaluated,
        exhaustive_search,
        best_order,
    })
}

/// Calculate the pages on a blocking task
pub async fn paginate(tracks: Vec<Track>, options: PaginationOptions) -> Result<Atlas> {
    tokio::task::spawn_blocking(move || find_pages(&tracks, &options)).await?
}
