use std::fmt;
use std::process::ExitStatus;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{EARTH_RADIUS_KM, EARTH_RADIUS_MI};

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No tracks to paginate")]
    NoTracks,
    #[error("Page calculation failed: {0}")]
    Geometry(String),
    #[error("Render command failed for {basename}: {status}")]
    Render { basename: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, AtlasError>;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Orientation {
    /// Not decided yet: the covered track fits both ways.
    /// Sized like portrait.
    #[default]
    Unknown,
    /// Portrait: height > width
    Portrait,
    /// Landscape: width > height
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => f.write_str("landscape"),
            Orientation::Portrait | Orientation::Unknown => f.write_str("portrait"),
        }
    }
}

/// Printable paper area in centimeters, without printer margins
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width_cm: f64,
    pub height_cm: f64,
}

impl PageSize {
    pub fn new(width_cm: f64, height_cm: f64) -> Self {
        Self {
            width_cm,
            height_cm,
        }
    }

    /// Get dimensions with orientation applied
    ///
    /// The configured width and height may be given in either order, the
    /// orientation alone decides which side is the long one.
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let short = self.width_cm.min(self.height_cm);
        let long = self.width_cm.max(self.height_cm);
        match orientation {
            Orientation::Landscape => (long, short),
            Orientation::Portrait | Orientation::Unknown => (short, long),
        }
    }
}

/// Unit for distances along a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LengthUnit {
    #[default]
    Km,
    Mi,
}

impl LengthUnit {
    /// Earth radius expressed in this unit
    pub fn earth_radius(self) -> f64 {
        match self {
            LengthUnit::Km => EARTH_RADIUS_KM,
            LengthUnit::Mi => EARTH_RADIUS_MI,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            LengthUnit::Km => "km",
            LengthUnit::Mi => "mi",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for LengthUnit {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "km" => Ok(LengthUnit::Km),
            "mi" => Ok(LengthUnit::Mi),
            _ => Err(AtlasError::Config(format!("Unknown length unit: {}", s))),
        }
    }
}

/// Order in which the finished pages are handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageOrder {
    /// Pages in the order they were calculated
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "naturalorder"))]
    Natural,
    /// Interleave both halves for double-sided printing
    #[cfg_attr(feature = "serde", serde(rename = "rectoverso"))]
    RectoVerso,
    /// Folded sheets of 4 pages, printed double-sided over the short edge
    #[cfg_attr(feature = "serde", serde(rename = "book"))]
    Book,
}

impl PageOrder {
    pub fn name(self) -> &'static str {
        match self {
            PageOrder::Natural => "naturalorder",
            PageOrder::RectoVerso => "rectoverso",
            PageOrder::Book => "book",
        }
    }
}

impl fmt::Display for PageOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageOrder {
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "naturalorder" => Ok(PageOrder::Natural),
            "rectoverso" => Ok(PageOrder::RectoVerso),
            "book" => Ok(PageOrder::Book),
            _ => Err(AtlasError::Config(format!("Unknown page order: {}", s))),
        }
    }
}

/// Statistics about a calculated atlas
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasStatistics {
    /// Number of tracks after joining tracks with shared endpoints
    pub tracks: usize,
    /// Number of track orders that were evaluated
    pub permutations_evaluated: usize,
    /// Whether every track order was evaluated
    pub exhaustive_search: bool,
    /// Number of detail pages
    pub detail_pages: usize,
    /// Whether an overview page is included
    pub overview: bool,
    /// Number of blank pages added by the page order
    pub blank_pages_added: usize,
    /// Total number of printed positions, blanks included
    pub output_pages: usize,
}
