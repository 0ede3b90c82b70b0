use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete atlas configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AtlasOptions {
    // Input
    pub gpx_files: Vec<PathBuf>,

    // Page calculation
    pub pagination: PaginationOptions,

    // Distance markers
    pub waypoints: WaypointOptions,

    // Print order
    pub page_order: PageOrder,

    // External renderer
    pub render: RenderOptions,
}

/// Paper and scale settings driving the page calculation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PaginationOptions {
    /// Scale denominator
    pub scale: f64,
    /// Paper size minus printer margins
    pub page_size: PageSize,
    /// Overlap between adjacent pages in cm
    pub page_overlap_cm: f64,
    /// Add an overview page in front of the detail pages
    pub overview: bool,
    /// Dump the pages found so far when the calculation fails
    pub debug: bool,
}

/// Distance marker settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WaypointOptions {
    /// Distance between markers, 0 disables them
    pub interval: f64,
    pub unit: LengthUnit,
}

/// External render command settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    pub command: String,
    /// Extra options passed to the command before the GPX files
    pub extra_args: Vec<String>,
    /// Output basename, the page position is appended
    pub output_basename: String,
    pub verbose: bool,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            gpx_files: Vec::new(),
            pagination: PaginationOptions::default(),
            waypoints: WaypointOptions::default(),
            page_order: PageOrder::Natural,
            render: RenderOptions::default(),
        }
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            page_size: PageSize::new(DEFAULT_PAGE_WIDTH_CM, DEFAULT_PAGE_HEIGHT_CM),
            page_overlap_cm: DEFAULT_PAGE_OVERLAP_CM,
            overview: false,
            debug: false,
        }
    }
}

impl Default for WaypointOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WAYPOINT_INTERVAL,
            unit: LengthUnit::Km,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            command: DEFAULT_RENDER_COMMAND.to_string(),
            extra_args: Vec::new(),
            output_basename: DEFAULT_OUTPUT_BASENAME.to_string(),
            verbose: false,
        }
    }
}

impl AtlasOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| AtlasError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AtlasError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.gpx_files.is_empty() {
            return Err(AtlasError::Config("No GPX files specified".to_string()));
        }

        self.pagination.validate()?;

        if !(self.waypoints.interval >= 0.0) {
            return Err(AtlasError::Config(format!(
                "Waypoint interval must not be negative, got {}",
                self.waypoints.interval
            )));
        }

        if self.render.command.is_empty() {
            return Err(AtlasError::Config("No render command specified".to_string()));
        }

        Ok(())
    }
}

impl PaginationOptions {
    /// Validate the paper and scale settings
    ///
    /// Both page sides must leave room for a track after the overlap is
    /// taken off, otherwise no point would ever fit on a page.
    pub fn validate(&self) -> Result<()> {
        if !(self.scale > 0.0) {
            return Err(AtlasError::Config(format!(
                "Scale must be positive, got {}",
                self.scale
            )));
        }

        if !(self.page_overlap_cm >= 0.0) {
            return Err(AtlasError::Config(format!(
                "Page overlap must not be negative, got {}",
                self.page_overlap_cm
            )));
        }

        let shortest = self.page_size.width_cm.min(self.page_size.height_cm);
        if !(shortest > self.page_overlap_cm) {
            return Err(AtlasError::Config(format!(
                "Page size {}x{} cm leaves no room next to an overlap of {} cm",
                self.page_size.width_cm, self.page_size.height_cm, self.page_overlap_cm
            )));
        }

        Ok(())
    }
}
