use atlas_paginate::*;
use std::path::PathBuf;

fn valid_options() -> AtlasOptions {
    let mut options = AtlasOptions::default();
    options.gpx_files.push(PathBuf::from("track.gpx"));
    options
}

#[test]
fn test_defaults() {
    let options = AtlasOptions::default();
    assert_eq!(options.pagination.scale, 50000.0);
    assert_eq!(options.pagination.page_size, PageSize::new(20.0, 28.7));
    assert_eq!(options.pagination.page_overlap_cm, 1.0);
    assert!(!options.pagination.overview);
    assert_eq!(options.waypoints.interval, 1.0);
    assert_eq!(options.waypoints.unit, LengthUnit::Km);
    assert_eq!(options.page_order, PageOrder::Natural);
    assert_eq!(options.render.output_basename, "detail.");
    assert_eq!(options.render.command, "hm-render-mapnik");
}

#[test]
fn test_validation_no_gpx_files() {
    let options = AtlasOptions::default();
    let result = options.validate();
    match result {
        Err(AtlasError::Config(msg)) => {
            assert!(msg.contains("No GPX files"));
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_scale() {
    let mut options = valid_options();
    assert!(options.validate().is_ok());

    options.pagination.scale = 0.0;
    assert!(options.validate().is_err());

    options.pagination.scale = -25000.0;
    assert!(options.validate().is_err());

    options.pagination.scale = f64::NAN;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_overlap() {
    let mut options = valid_options();

    options.pagination.page_overlap_cm = -1.0;
    assert!(options.validate().is_err());

    // Overlap as large as the short side leaves nothing
    options.pagination.page_overlap_cm = 20.0;
    assert!(options.validate().is_err());

    options.pagination.page_overlap_cm = 0.0;
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_waypoint_interval() {
    let mut options = valid_options();

    options.waypoints.interval = 0.0;
    assert!(options.validate().is_ok());

    options.waypoints.interval = -1.0;
    assert!(options.validate().is_err());
}

#[test]
fn test_validation_render_command() {
    let mut options = valid_options();
    options.render.command.clear();
    assert!(options.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = valid_options();
    options.pagination.scale = 25000.0;
    options.pagination.overview = true;
    options.waypoints.unit = LengthUnit::Mi;
    options.page_order = PageOrder::Book;
    options.render.extra_args = vec!["--dpi".to_string(), "300".to_string()];

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = AtlasOptions::load(path).await.unwrap();
    assert_eq!(options, loaded);

    let json = std::fs::read_to_string(path).unwrap();
    assert!(json.contains("\"book\""));
    assert!(json.contains("\"mi\""));
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        r#"{{"gpx_files": ["a.gpx"], "page_order": "rectoverso", "pagination": {{"scale": 100000}}}}"#
    )
    .unwrap();

    let loaded = AtlasOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.gpx_files, vec![PathBuf::from("a.gpx")]);
    assert_eq!(loaded.page_order, PageOrder::RectoVerso);
    assert_eq!(loaded.pagination.scale, 100000.0);
    assert_eq!(loaded.pagination.page_size, PageSize::new(20.0, 28.7));
    assert_eq!(loaded.render.command, "hm-render-mapnik");
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_invalid_config() {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "not json").unwrap();

    let result = AtlasOptions::load(temp_file.path()).await;
    assert!(matches!(result, Err(AtlasError::Config(_))));
}
