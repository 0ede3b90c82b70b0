use crate::options::AtlasOptions;
use crate::order::blank_pages_needed;
use crate::partition::Atlas;
use crate::types::*;

/// Calculate statistics for a paginated atlas
///
/// `tracks` is the number of assembled tracks the atlas was built from.
pub fn calculate_statistics(
    atlas: &Atlas,
    tracks: usize,
    options: &AtlasOptions,
) -> Result<AtlasStatistics> {
    let detail_pages = atlas.detail_page_count();
    if detail_pages == 0 {
        return Err(AtlasError::NoTracks);
    }

    let overview = atlas.overview().is_some();
    let pages = atlas.pages.len();
    let blank_pages_added = blank_pages_needed(pages, options.page_order);

    Ok(AtlasStatistics {
        tracks,
        permutations_evaluated: atlas.permutations_evaluated,
        exhaustive_search: atlas.exhaustive_search,
        detail_pages,
        overview,
        blank_pages_added,
        output_pages: pages + blank_pages_added,
    })
}
