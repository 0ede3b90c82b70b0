pub mod constants;
pub mod geo;
mod options;
pub mod order;
pub mod page;
mod partition;
mod render;
mod stats;
mod tracks;
mod types;
mod waypoints;

pub use geo::{Coordinate, Extent};
pub use options::*;
pub use order::{reorder, reorder_pages};
pub use page::{OverviewBuilder, Page, PageBuilder, build_overview};
pub use partition::{Atlas, find_pages, paginate};
pub use render::{Overlays, RenderJob, output_basename, render_args, render_atlas, render_jobs, render_page};
pub use stats::calculate_statistics;
pub use tracks::{Track, TrackAssembler, load_gpx, load_tracks, parse_gpx};
pub use types::*;
pub use waypoints::{
    DistanceMarker, calculate_markers, calculate_waypoints, format_distance, waypoints_gpx,
    write_waypoints_tempfile,
};
