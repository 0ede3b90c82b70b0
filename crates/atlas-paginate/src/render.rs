//! External render command dispatch
//!
//! Every page is rendered by one invocation of the configured command:
//!
//! ```text
//! <command> --pagewidth W --pageheight H -b <basename> [-t overview.gpx | -y waypoints.gpx]
//!           [-v] [extra options...] <gpx files...> bbox -o MINLON -a MINLAT -O MAXLON -A MAXLAT
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::info;

use crate::options::{AtlasOptions, RenderOptions};
use crate::page::Page;
use crate::types::*;

/// Extra GPX files drawn on top of the map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    /// Page outlines, passed to the overview page with `-t`
    pub overview: Option<PathBuf>,
    /// Distance markers, passed to detail pages with `-y`
    pub waypoints: Option<PathBuf>,
}

impl Overlays {
    fn for_page(&self, page: &Page) -> Option<(&'static str, &Path)> {
        if page.is_overview() {
            self.overview.as_deref().map(|path| ("-t", path))
        } else {
            self.waypoints.as_deref().map(|path| ("-y", path))
        }
    }
}

/// A page with its output basename
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob<'a> {
    /// Position in the printed sequence, blanks included
    pub position: usize,
    pub basename: String,
    pub page: &'a Page,
}

/// Output basename for `position` in a sequence of `total` pages
///
/// The position is zero-padded to the number of digits of `total`.
pub fn output_basename(basename: &str, position: usize, total: usize) -> String {
    let width = total.to_string().len();
    format!("{}{:0width$}", basename, position, width = width)
}

/// Jobs for every non-blank page in print order
pub fn render_jobs<'a>(pages: &'a [Option<Page>], basename: &str) -> Vec<RenderJob<'a>> {
    pages
        .iter()
        .enumerate()
        .filter_map(|(position, page)| {
            page.as_ref().map(|page| RenderJob {
                position,
                basename: output_basename(basename, position, pages.len()),
                page,
            })
        })
        .collect()
}

/// Command line arguments for rendering `page`, command excluded
pub fn render_args(
    page: &Page,
    basename: &str,
    overlays: &Overlays,
    gpx_files: &[PathBuf],
    options: &RenderOptions,
) -> Result<Vec<OsString>> {
    let mut args: Vec<OsString> = vec![
        "--pagewidth".into(),
        page.page_width_cm().to_string().into(),
        "--pageheight".into(),
        page.page_height_cm().to_string().into(),
        "-b".into(),
        basename.into(),
    ];

    if let Some((flag, path)) = overlays.for_page(page) {
        args.push(flag.into());
        args.push(path.into());
    }
    if options.verbose {
        args.push("-v".into());
    }
    args.extend(options.extra_args.iter().map(OsString::from));

    for file in gpx_files {
        args.push(std::path::absolute(file)?.into());
    }

    let extent = page.extent();
    let bbox: [OsString; 9] = [
        "bbox".into(),
        "-o".into(),
        extent.min_lon().to_string().into(),
        "-a".into(),
        extent.min_lat().to_string().into(),
        "-O".into(),
        extent.max_lon().to_string().into(),
        "-A".into(),
        extent.max_lat().to_string().into(),
    ];
    args.extend(bbox);

    Ok(args)
}

/// Run the render command for one page
///
/// The command inherits stdout and stderr. A non-zero exit status is
/// reported as [`AtlasError::Render`].
pub async fn render_page(
    job: &RenderJob<'_>,
    overlays: &Overlays,
    gpx_files: &[PathBuf],
    options: &RenderOptions,
) -> Result<()> {
    info!("{}", job.page);

    let args = render_args(job.page, &job.basename, overlays, gpx_files, options)?;
    let status = tokio::process::Command::new(&options.command)
        .args(&args)
        .status()
        .await?;

    if !status.success() {
        return Err(AtlasError::Render {
            basename: job.basename.clone(),
            status,
        });
    }
    Ok(())
}

/// Render every non-blank page, stopping at the first failure
///
/// Returns the number of rendered pages.
pub async fn render_atlas(
    pages: &[Option<Page>],
    overlays: &Overlays,
    options: &AtlasOptions,
) -> Result<usize> {
    let jobs = render_jobs(pages, &options.render.output_basename);
    for job in &jobs {
        render_page(job, overlays, &options.gpx_files, &options.render).await?;
    }
    Ok(jobs.len())
}
