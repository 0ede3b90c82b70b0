mod logger;

use anyhow::Result;
use atlas_paginate::constants::DEFAULT_RENDER_COMMAND;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::error;
use std::path::PathBuf;

use logger::ConsoleLogger;

#[derive(Parser)]
#[command(
    name = "atlas",
    about = "Split GPX tracks over the fewest printable map pages",
    version
)]
struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the pages and show statistics
    Pages {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Calculate the pages and render each one with an external command
    Render {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Render command
        #[arg(long, default_value = DEFAULT_RENDER_COMMAND)]
        render_command: String,

        /// Options passed to the render command, after --
        #[arg(last = true)]
        render_options: Vec<String>,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// One or more GPX files
    #[arg(long, num_args = 1.., required_unless_present = "config")]
    gpx: Vec<PathBuf>,

    /// Base configuration as JSON, other arguments override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scale denominator [default: 50000]
    #[arg(short, long)]
    scale: Option<f64>,

    /// Paper width minus margin in cm [default: 20.0]
    #[arg(long)]
    pagewidth: Option<f64>,

    /// Paper height minus margin in cm [default: 28.7]
    #[arg(long)]
    pageheight: Option<f64>,

    /// Page overlap in cm [default: 1.0]
    #[arg(long)]
    pageoverlap: Option<f64>,

    /// Add an overview page
    #[arg(long)]
    overview: bool,

    /// Add the cumulative length every N km or mi, 0 to disable [default: 1]
    #[arg(short, long)]
    waypoints: Option<f64>,

    /// Unit of the waypoints interval [default: km]
    #[arg(short, long, value_enum)]
    unit: Option<UnitArg>,

    /// Order in which the pages are generated [default: naturalorder]
    #[arg(short = 'o', long, value_enum)]
    page_order: Option<PageOrderArg>,

    /// Output basename, the page number and extension are added [default: detail.]
    #[arg(short, long)]
    basename: Option<String>,

    #[arg(long, hide = true)]
    debug: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Km,
    Mi,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageOrderArg {
    #[value(name = "naturalorder")]
    Natural,
    #[value(name = "rectoverso")]
    RectoVerso,
    Book,
}

impl From<UnitArg> for atlas_paginate::LengthUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Km => Self::Km,
            UnitArg::Mi => Self::Mi,
        }
    }
}

impl From<PageOrderArg> for atlas_paginate::PageOrder {
    fn from(arg: PageOrderArg) -> Self {
        match arg {
            PageOrderArg::Natural => Self::Natural,
            PageOrderArg::RectoVerso => Self::RectoVerso,
            PageOrderArg::Book => Self::Book,
        }
    }
}

impl LayoutArgs {
    /// Start from the configuration file (or the defaults) and apply the
    /// arguments given on the command line
    async fn into_options(self, verbose: bool) -> Result<atlas_paginate::AtlasOptions> {
        let mut options = match &self.config {
            Some(path) => atlas_paginate::AtlasOptions::load(path).await?,
            None => atlas_paginate::AtlasOptions::default(),
        };

        if !self.gpx.is_empty() {
            options.gpx_files = self.gpx;
        }
        if let Some(scale) = self.scale {
            options.pagination.scale = scale;
        }
        if let Some(width) = self.pagewidth {
            options.pagination.page_size.width_cm = width;
        }
        if let Some(height) = self.pageheight {
            options.pagination.page_size.height_cm = height;
        }
        if let Some(overlap) = self.pageoverlap {
            options.pagination.page_overlap_cm = overlap;
        }
        options.pagination.overview |= self.overview;
        options.pagination.debug |= self.debug;
        if let Some(interval) = self.waypoints {
            options.waypoints.interval = interval;
        }
        if let Some(unit) = self.unit {
            options.waypoints.unit = unit.into();
        }
        if let Some(order) = self.page_order {
            options.page_order = order.into();
        }
        if let Some(basename) = self.basename {
            options.render.output_basename = basename;
        }
        options.render.verbose |= verbose;

        Ok(options)
    }
}

/// Distance markers are only drawn on rendered pages
fn distance_markers(
    render: bool,
    tracks: &[atlas_paginate::Track],
    options: &atlas_paginate::WaypointOptions,
) -> Vec<atlas_paginate::DistanceMarker> {
    if render {
        atlas_paginate::calculate_waypoints(tracks, options)
    } else {
        Vec::new()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    ConsoleLogger::new(cli.verbose).init()?;

    let (layout, render) = match cli.command {
        Commands::Pages { layout } => (layout, None),
        Commands::Render {
            layout,
            render_command,
            render_options,
        } => (layout, Some((render_command, render_options))),
    };

    let mut options = layout.into_options(cli.verbose).await?;
    if let Some((command, extra_args)) = &render {
        options.render.command = command.clone();
        if !extra_args.is_empty() {
            options.render.extra_args = extra_args.clone();
        }
    }
    options.validate()?;

    // Read tracks
    let tracks = atlas_paginate::load_tracks(&options.gpx_files).await?;
    let track_count = tracks.len();
    let markers = distance_markers(render.is_some(), &tracks, &options.waypoints);

    // Calculate pages
    let atlas = atlas_paginate::paginate(tracks, options.pagination.clone()).await?;

    let stats = atlas_paginate::calculate_statistics(&atlas, track_count, &options)?;
    println!("Atlas Statistics:");
    println!("  Tracks: {}", stats.tracks);
    println!(
        "  Track orders evaluated: {}{}",
        stats.permutations_evaluated,
        if stats.exhaustive_search {
            ""
        } else {
            " (input order only)"
        }
    );
    println!("  Detail pages: {}", stats.detail_pages);
    println!("  Overview: {}", if stats.overview { "yes" } else { "no" });
    println!("  Blank pages added: {}", stats.blank_pages_added);
    println!("  Output pages: {}", stats.output_pages);

    if render.is_none() {
        for page in &atlas.pages {
            println!("{}", page);
        }
        return Ok(());
    }

    // Temp files live until the end of main
    let waypoint_file = if markers.is_empty() {
        None
    } else {
        Some(atlas_paginate::write_waypoints_tempfile(&markers)?)
    };
    let overview_file = match atlas.overview() {
        Some(_) => Some(atlas_paginate::page::write_overview_tempfile(&atlas.pages)?),
        None => None,
    };
    let overlays = atlas_paginate::Overlays {
        overview: overview_file.as_ref().map(|file| file.path().to_path_buf()),
        waypoints: waypoint_file.as_ref().map(|file| file.path().to_path_buf()),
    };

    let ordered = atlas_paginate::reorder_pages(atlas.pages, options.page_order);
    let jobs = atlas_paginate::render_jobs(&ordered, &options.render.output_basename);

    let mut failed = Vec::new();
    for job in &jobs {
        if let Err(e) =
            atlas_paginate::render_page(job, &overlays, &options.gpx_files, &options.render).await
        {
            error!("{}", e);
            failed.push(job.basename.clone());
        }
    }

    println!("Rendered {} of {} pages", jobs.len() - failed.len(), jobs.len());
    if !failed.is_empty() {
        anyhow::bail!("Rendering failed for {}", failed.join(", "));
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
