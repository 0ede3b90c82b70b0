use atlas_paginate::*;

/// East-west track with a slight zigzag, `step` degrees between points
fn east_west(start_lon: f64, lat: f64, count: usize, step: f64) -> Track {
    Track::new(
        (0..count)
            .map(|i| Coordinate::new(start_lon + step * i as f64, lat + 0.0005 * (i % 2) as f64))
            .collect(),
    )
}

/// Short track that always fits on one page
fn blob(lon: f64, lat: f64) -> Track {
    Track::new(vec![
        Coordinate::new(lon, lat),
        Coordinate::new(lon + 0.01, lat + 0.005),
        Coordinate::new(lon + 0.02, lat - 0.005),
    ])
}

fn assert_covered(atlas: &Atlas, tracks: &[Track]) {
    for track in tracks {
        for coord in track.points() {
            assert!(
                atlas.detail_pages().any(|page| page.contains(coord)),
                "{} is not on any page",
                coord
            );
        }
    }
}

#[test]
fn test_single_point_track() {
    let tracks = vec![Track::new(vec![Coordinate::new(4.0, 50.0)])];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();

    assert_eq!(atlas.pages.len(), 1);
    let page = &atlas.pages[0];
    assert_eq!(page.index(), 1);
    assert_eq!(page.track_extent().width(), 0.0);
    assert_eq!(page.track_extent().height(), 0.0);
    assert!(page.contains(&Coordinate::new(4.0, 50.0)));
}

#[test]
fn test_short_track_single_page() {
    let tracks = vec![blob(4.0, 50.0)];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();
    assert_eq!(atlas.detail_page_count(), 1);
    assert_covered(&atlas, &tracks);
}

#[test]
fn test_long_track_splits_into_pages() {
    let tracks = vec![east_west(0.0, 0.0, 101, 0.01)];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();

    // About 0.1245 degrees of track per landscape page
    let count = atlas.detail_page_count();
    assert!((8..=10).contains(&count), "unexpected page count {}", count);
    assert_covered(&atlas, &tracks);

    assert_eq!(atlas.pages[0].orientation(), Orientation::Landscape);
    for (i, page) in atlas.pages.iter().enumerate() {
        assert_eq!(page.index(), i + 1);
    }
}

#[test]
fn test_consecutive_pages_touch() {
    let tracks = vec![east_west(0.0, 0.0, 61, 0.01)];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();
    assert!(atlas.pages.len() > 1);

    // The next page starts where the track left the previous one
    for pair in atlas.pages.windows(2) {
        let gap = pair[1].track_extent().min_lon() - pair[0].track_extent().max_lon();
        assert!(gap.abs() < 1e-9);
    }
}

#[test]
fn test_coverage_at_higher_latitude() {
    let tracks = vec![
        Track::new(
            (0..80)
                .map(|i| {
                    let t = i as f64;
                    Coordinate::new(6.0 + 0.004 * t, 46.0 + 0.003 * t + 0.002 * (t / 5.0).sin())
                })
                .collect(),
        ),
        east_west(6.1, 46.05, 40, 0.008),
    ];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();
    assert!(atlas.detail_page_count() >= 2);
    assert_covered(&atlas, &tracks);
}

#[test]
fn test_duplicate_track_is_skipped() {
    let track = east_west(0.0, 0.0, 31, 0.01);
    let single = find_pages(std::slice::from_ref(&track), &PaginationOptions::default()).unwrap();
    let double = find_pages(&[track.clone(), track], &PaginationOptions::default()).unwrap();

    assert_eq!(single.detail_page_count(), double.detail_page_count());
}

#[test]
fn test_separate_tracks_get_own_pages() {
    let tracks = vec![blob(0.0, 0.0), blob(1.0, 0.0), blob(2.0, 0.0)];
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();

    assert_eq!(atlas.detail_page_count(), 3);
    assert_eq!(atlas.permutations_evaluated, 6);
    assert!(atlas.exhaustive_search);
    assert_eq!(atlas.best_order, vec![0, 1, 2]);
}

#[test]
fn test_minimum_independent_of_input_order() {
    let tracks = vec![
        east_west(0.0, 0.0, 30, 0.01),
        east_west(0.1, 0.02, 40, 0.01),
        east_west(0.35, -0.05, 20, 0.01),
    ];

    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    let counts: Vec<usize> = orders
        .iter()
        .map(|order| {
            let reordered: Vec<Track> = order.iter().map(|&i| tracks[i].clone()).collect();
            let atlas = find_pages(&reordered, &PaginationOptions::default()).unwrap();
            assert_covered(&atlas, &reordered);
            atlas.detail_page_count()
        })
        .collect();

    assert!(counts.iter().all(|&count| count == counts[0]));
}

#[test]
fn test_too_many_tracks_skip_search() {
    let tracks: Vec<Track> = (0..7).map(|i| blob(i as f64, 0.0)).collect();
    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();

    assert!(!atlas.exhaustive_search);
    assert_eq!(atlas.permutations_evaluated, 1);
    assert_eq!(atlas.detail_page_count(), 7);
    assert_eq!(atlas.best_order, (0..7).collect::<Vec<_>>());
}

#[test]
fn test_overview_page_first() {
    let tracks = vec![blob(0.0, 0.0), blob(0.5, 0.0)];
    let options = PaginationOptions {
        overview: true,
        ..Default::default()
    };
    let atlas = find_pages(&tracks, &options).unwrap();

    assert_eq!(atlas.pages.len(), 3);
    let overview = atlas.overview().unwrap();
    assert_eq!(overview.index(), 0);
    for page in atlas.detail_pages() {
        assert!(overview.contains(&page.extent().center()));
    }
}

#[test]
fn test_no_tracks() {
    let result = find_pages(&[], &PaginationOptions::default());
    assert!(matches!(result, Err(AtlasError::NoTracks)));

    let result = find_pages(&[Track::new(Vec::new())], &PaginationOptions::default());
    assert!(matches!(result, Err(AtlasError::NoTracks)));
}

#[test]
fn test_invalid_options_rejected() {
    let options = PaginationOptions {
        scale: 0.0,
        ..Default::default()
    };
    let result = find_pages(&[blob(0.0, 0.0)], &options);
    assert!(matches!(result, Err(AtlasError::Config(_))));
}

#[test]
fn test_debug_mode_succeeds_on_valid_input() {
    let tracks = vec![east_west(0.0, 0.0, 50, 0.01)];
    let options = PaginationOptions {
        debug: true,
        ..Default::default()
    };
    let atlas = find_pages(&tracks, &options).unwrap();
    assert_covered(&atlas, &tracks);
}

#[test]
fn test_track_returning_south_inside_page() {
    let capacity = geo::cm_to_degrees_lon(27.7, 50000.0, 60.0);
    let tracks = vec![Track::new(vec![
        Coordinate::new(0.0, 60.0),
        Coordinate::new(capacity * 0.9999, 60.0),
        Coordinate::new(capacity * 0.5, 59.99),
        Coordinate::new(capacity * 0.5, 59.995),
    ])];

    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();
    assert_eq!(atlas.detail_page_count(), 1);
    assert_eq!(atlas.pages[0].orientation(), Orientation::Landscape);
    assert_covered(&atlas, &tracks);
}

#[test]
fn test_leaving_covered_area_after_skipped_points() {
    // East, back west over the finished pages, then north out of page 1
    let mut points: Vec<Coordinate> = (0..=30)
        .map(|i| Coordinate::new(0.01 * i as f64, 0.0))
        .collect();
    points.extend((1..=28).map(|i| Coordinate::new(0.3 - 0.01 * i as f64, 0.002)));
    points.extend((1..=30).map(|i| Coordinate::new(0.02, 0.002 + 0.01 * i as f64)));
    let tracks = vec![Track::new(points)];

    let atlas = find_pages(&tracks, &PaginationOptions::default()).unwrap();
    assert_covered(&atlas, &tracks);

    // The page after the skipped points starts on the border of page 1
    let first = &atlas.pages[0];
    let resumed = atlas
        .pages
        .iter()
        .find(|page| (page.track_extent().min_lon() - 0.02).abs() < 1e-12)
        .unwrap();
    assert!(resumed.index() > 3);
    assert!((resumed.track_extent().min_lat() - first.extent().max_lat()).abs() < 1e-12);
}

#[test]
fn test_debug_dump_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    // A point without a position makes the next split impossible
    let mut points: Vec<Coordinate> = (0..=20)
        .map(|i| Coordinate::new(0.01 * i as f64, 0.0))
        .collect();
    points.push(Coordinate::new(f64::NAN, 0.0));
    points.push(Coordinate::new(5.0, 0.0));
    let options = PaginationOptions {
        debug: true,
        ..Default::default()
    };
    let result = find_pages(&[Track::new(points)], &options);

    let dump = dir.path().join(constants::DEBUG_OVERVIEW_FILE);
    let bytes = std::fs::read(&dump);
    std::env::set_current_dir(cwd).unwrap();

    assert!(matches!(result, Err(AtlasError::Geometry(_))));
    let gpx = parse_gpx(&bytes.unwrap()).unwrap();
    assert_eq!(gpx.tracks.len(), 1);
    assert_eq!(gpx.tracks[0].name.as_deref(), Some("Page 1"));
}

#[tokio::test]
async fn test_paginate_async() {
    let tracks = vec![east_west(0.0, 0.0, 40, 0.01)];
    let expected = find_pages(&tracks, &PaginationOptions::default()).unwrap();

    let atlas = paginate(tracks, PaginationOptions::default()).await.unwrap();
    assert_eq!(atlas, expected);
}
