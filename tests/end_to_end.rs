mod common;

use common::CollectingSink;
use eclipse_map::ephemeris::AnalyticEphemeris;
use eclipse_map::feasibility::{eclipse_impossible, geocentric_separation};
use eclipse_map::fraction::eclipse_fraction;
use eclipse_map::options::{AnnulusPolicy, RunOptions};
use eclipse_map::search::search_range;
use eclipse_map::time::parse_instant;

#[test]
fn total_eclipse_of_2017_forms_one_window() {
    let ephemeris = AnalyticEphemeris::default();
    let start = parse_instant("2017-08-21-15-00-00").unwrap();
    let end = parse_instant("2017-08-21-22-00-00").unwrap();
    let options = RunOptions {
        time_step: 1200,
        search_step: 600,
        ..Default::default()
    };
    let mut sink = CollectingSink::default();

    let summary = search_range(&ephemeris, &mut sink, &start, &end, &options).unwrap();

    assert_eq!(summary.windows.len(), 1);
    let window = &summary.windows[0];
    // partial phase on Earth from 15:47 to 20:52 UTC
    assert!(window.start >= parse_instant("2017-08-21-15-30-00").unwrap());
    assert!(window.start <= parse_instant("2017-08-21-16-10-00").unwrap());
    assert!(window.end >= parse_instant("2017-08-21-20-40-00").unwrap());
    assert!(window.end <= parse_instant("2017-08-21-22-00-00").unwrap());
    assert!(window.images >= 12, "only {} images", window.images);
    assert_eq!(summary.images() as usize, sink.frames.len());

    for (expected, frame) in (1..).zip(&sink.frames) {
        assert_eq!(frame.index, expected);
        assert_eq!((frame.rows, frame.cols), (180, 360));
        assert!(frame.min >= 0.0 && frame.max <= 100.0);
        assert!(frame.max > 0.0);
    }
    assert!(sink
        .frames
        .windows(2)
        .all(|pair| pair[1].instant > pair[0].instant));

    // totality is sampled at least once
    assert!(sink.frames.iter().any(|frame| frame.max == 100.0));
}

#[test]
fn greatest_eclipse_point_sees_totality() {
    let ephemeris = AnalyticEphemeris::default();
    let t = parse_instant("2017-08-21-18-25-32").unwrap();

    let central =
        eclipse_fraction(&ephemeris, &t, 36.97, -87.67, AnnulusPolicy::Percentage).unwrap();
    assert_eq!(central, 100.0);

    // Sun down in Sydney, outside the penumbra in London
    let sydney =
        eclipse_fraction(&ephemeris, &t, -33.87, 151.2, AnnulusPolicy::Percentage).unwrap();
    assert_eq!(sydney, 0.0);
    let london = eclipse_fraction(&ephemeris, &t, 51.5, 0.0, AnnulusPolicy::Percentage).unwrap();
    assert_eq!(london, 0.0);
}

#[test]
fn feasibility_follows_the_lunar_month() {
    let ephemeris = AnalyticEphemeris::default();

    let eclipse = parse_instant("2017-08-21-18-26-00").unwrap();
    assert!(!eclipse_impossible(&ephemeris, &eclipse).unwrap());
    assert!(geocentric_separation(&ephemeris, &eclipse).unwrap() < 0.6);

    // six months later the Moon is a waxing crescent, far from the Sun
    let later = parse_instant("2018-02-21-18-26-00").unwrap();
    assert!(eclipse_impossible(&ephemeris, &later).unwrap());
    assert!(geocentric_separation(&ephemeris, &later).unwrap() > 30.0);
}

#[test]
fn range_without_eclipse_emits_nothing() {
    // full moon of 2018-03-02
    let ephemeris = AnalyticEphemeris::default();
    let start = parse_instant("2018-03-01-00-00-00").unwrap();
    let end = parse_instant("2018-03-02-00-00-00").unwrap();
    let options = RunOptions {
        search_step: 3600,
        ..Default::default()
    };
    let mut sink = CollectingSink::default();

    let summary = search_range(&ephemeris, &mut sink, &start, &end, &options).unwrap();

    assert!(summary.windows.is_empty());
    assert_eq!(summary.near_misses, 0);
    assert!(sink.frames.is_empty());
    assert!(summary.last_instant.is_some());
}
