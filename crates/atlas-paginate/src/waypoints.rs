//! Distance markers along the tracks

use gpx::{Gpx, GpxVersion, Waypoint};
use log::info;
use tempfile::NamedTempFile;

use crate::constants::GPX_CREATOR;
use crate::geo::Coordinate;
use crate::options::WaypointOptions;
use crate::tracks::Track;
use crate::types::*;

/// A labelled point at a cumulative distance along a track
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMarker {
    pub coordinate: Coordinate,
    pub distance: f64,
    pub label: String,
}

/// Place a marker every `interval` along `track`, starting at its first point
///
/// The last marker lies strictly before the end of the track. An interval
/// that is not positive yields no markers.
pub fn calculate_markers(track: &Track, interval: f64, unit: LengthUnit) -> Vec<DistanceMarker> {
    let mut markers = Vec::new();
    if !(interval > 0.0) {
        return markers;
    }

    let mut next_marker = 0.0;
    let mut cumulative = 0.0;
    for pair in track.points().windows(2) {
        let (prev, coord) = (&pair[0], &pair[1]);
        let cumulative_prev = cumulative;
        cumulative += prev.distance(coord, unit);

        while next_marker < cumulative {
            markers.push(DistanceMarker {
                coordinate: prev.destination_point(coord, next_marker - cumulative_prev, unit),
                distance: next_marker,
                label: format_distance(next_marker),
            });
            next_marker += interval;
        }
    }

    markers
}

/// Markers for all tracks, in track order
pub fn calculate_waypoints(tracks: &[Track], options: &WaypointOptions) -> Vec<DistanceMarker> {
    let mut markers = Vec::new();
    for (index, track) in tracks.iter().enumerate() {
        info!("Generating waypoints for track {}: {}", index, track.describe());
        markers.extend(calculate_markers(track, options.interval, options.unit));
        info!(
            "Total track distance: {:.2} {}",
            track.length(options.unit),
            options.unit
        );
    }
    markers
}

/// Distance with at most two decimals, trailing zeros dropped
pub fn format_distance(distance: f64) -> String {
    let text = format!("{:.2}", distance);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn waypoints_gpx(markers: &[DistanceMarker]) -> Gpx {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(GPX_CREATOR.to_string()),
        ..Default::default()
    };

    gpx.waypoints = markers
        .iter()
        .map(|marker| {
            let mut waypoint = Waypoint::new(marker.coordinate.into());
            waypoint.name = Some(marker.label.clone());
            waypoint
        })
        .collect();

    gpx
}

/// Write the markers to a temporary GPX file, removed when the handle drops
pub fn write_waypoints_tempfile(markers: &[DistanceMarker]) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix("atlas_waypoints")
        .suffix(".gpx")
        .tempfile()?;
    gpx::write(&waypoints_gpx(markers), file.as_file())?;
    Ok(file)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(0.0), "0");
        assert_eq!(format_distance(1.0), "1");
        assert_eq!(format_distance(2.5), "2.5");
        assert_eq!(format_distance(3.25), "3.25");
        assert_eq!(format_distance(10.0), "10");
    }

    #[test]
    fn test_no_markers_for_zero_interval() {
        let track = Track::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.1, 0.0)]);
        assert!(calculate_markers(&track, 0.0, LengthUnit::Km).is_empty());
    }
}
