//! GPX input and track assembly
//!
//! Every `trk` element becomes one polyline. Polylines sharing an endpoint
//! are joined into a single path so a route split over several files or
//! tracks is paginated as one walk.

use std::path::Path;

use log::info;

use crate::geo::{Coordinate, Extent};
use crate::types::*;

/// A continuous path of coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    points: Vec<Coordinate>,
}

impl Track {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Coordinate> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tight extent around all points, `None` for an empty track
    pub fn extent(&self) -> Option<Extent> {
        Extent::from_coordinates(&self.points)
    }

    /// Sum of the great-circle distances between consecutive points
    pub fn length(&self, unit: LengthUnit) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1], unit))
            .sum()
    }

    /// Start and end point for log messages
    pub(crate) fn describe(&self) -> String {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => format!("{} - {}", first, last),
            _ => "[empty]".to_string(),
        }
    }
}

impl From<Vec<Coordinate>> for Track {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Joins polylines that share endpoints
#[derive(Debug, Clone, Default)]
pub struct TrackAssembler {
    tracks: Vec<Track>,
}

impl TrackAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polyline, connecting it to the first existing track it shares
    /// an endpoint with
    ///
    /// Empty polylines are ignored. Returns the index of the track that now
    /// holds the points.
    pub fn add_track(&mut self, mut points: Vec<Coordinate>) -> Option<usize> {
        let (&start, &end) = (points.first()?, points.last()?);

        for (index, existing) in self.tracks.iter_mut().enumerate() {
            let (Some(&existing_start), Some(&existing_end)) =
                (existing.points.first(), existing.points.last())
            else {
                continue;
            };

            // Reverse so the shared endpoint lines up with the opposite end
            let (start, end) = if existing_start == start {
                info!("=> same startpoint as track {}: reversing track", index);
                points.reverse();
                (end, start)
            } else if existing_end == end {
                info!("=> same endpoint as track {}: reversing track", index);
                points.reverse();
                (end, start)
            } else {
                (start, end)
            };

            if existing_end == start {
                info!("=> connecting after track {}", index);
                existing.points.extend_from_slice(&points[1..]);
                return Some(index);
            } else if existing_start == end {
                info!("=> connecting before track {}", index);
                points.extend_from_slice(&existing.points[1..]);
                existing.points = points;
                return Some(index);
            }
        }

        info!("=> new track {}", self.tracks.len());
        self.tracks.push(Track::new(points));
        Some(self.tracks.len() - 1)
    }

    /// Add every track of a GPX document, segments concatenated
    pub fn add_gpx(&mut self, gpx: &gpx::Gpx) {
        for track in &gpx.tracks {
            info!(
                "Found track {}",
                track.name.as_deref().filter(|name| !name.is_empty()).unwrap_or("[unnamed]")
            );

            let points: Vec<Coordinate> = track
                .segments
                .iter()
                .flat_map(|segment| segment.points.iter())
                .map(|waypoint| Coordinate::from(waypoint.point()))
                .collect();
            self.add_track(points);
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }
}

/// Parse a GPX document from memory
pub fn parse_gpx(bytes: &[u8]) -> Result<gpx::Gpx> {
    Ok(gpx::read(bytes)?)
}

/// Load a single GPX file
pub async fn load_gpx(path: impl AsRef<Path>) -> Result<gpx::Gpx> {
    let path = path.as_ref().to_owned();
    info!("Reading file {}", path.display());
    let bytes = tokio::fs::read(&path).await?;
    let gpx = tokio::task::spawn_blocking(move || parse_gpx(&bytes)).await??;
    Ok(gpx)
}

/// Load and assemble the tracks of several GPX files, in file order
pub async fn load_tracks(paths: &[impl AsRef<Path>]) -> Result<Vec<Track>> {
    let mut assembler = TrackAssembler::new();
    for path in paths {
        let gpx = load_gpx(path).await?;
        assembler.add_gpx(&gpx);
    }

    let tracks = assembler.into_tracks();
    if tracks.is_empty() {
        return Err(AtlasError::NoTracks);
    }
    Ok(tracks)
}
