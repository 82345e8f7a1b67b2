//! End-to-end properties of the catalog-to-scene pipeline

mod common;

use std::sync::Arc;

use common::{norm, random_catalog};
use starcat::{CatalogSource, HostIndex, SourceId};
use starscene::{ColorMode, Pipeline, PipelineConfig, PipelineRequest, RandomSource};

const DISTANCE_CAP_PC: f64 = 10_000.0;

fn seeded(seed: u64) -> Pipeline {
    Pipeline::new(PipelineConfig::seeded(seed)).unwrap()
}

#[test]
fn test_invalid_parallax_never_emitted() {
    let _ = env_logger::builder().is_test(true).try_init();

    let sources = random_catalog(3000, 1);
    let request = PipelineRequest::new(sources.clone(), 2016.0, 25.0);
    let result = seeded(7).run(&request).unwrap();

    assert!(!result.is_empty());
    for star in result.stars() {
        let parallax = sources[star.source_index].parallax;
        assert!(
            matches!(parallax, Some(p) if p.is_finite() && p > 0.0),
            "source {} emitted with parallax {:?}",
            star.source_index,
            parallax
        );
    }
    let invalid = sources
        .iter()
        .filter(|s| s.valid_parallax().is_none())
        .count();
    assert_eq!(result.stats.invalid_parallax, invalid);
}

#[test]
fn test_output_is_finite_and_bounded() {
    for mode in [ColorMode::Grayscale, ColorMode::ColorIndex] {
        let mut config = PipelineConfig::seeded(11);
        config.color_mode = mode;
        config.uncertainty_radii = true;
        let pipeline = Pipeline::new(config).unwrap();

        let request = PipelineRequest::new(random_catalog(6000, 2), 2040.0, 21.0);
        let result = pipeline.run(&request).unwrap();

        assert_eq!(result.positions.len(), result.len() * 3);
        assert_eq!(result.colors.len(), result.len() * 3);
        assert_eq!(result.source_indices.len(), result.len());
        assert!(result.positions.iter().all(|c| c.is_finite()));
        assert!(result
            .colors
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c)));
        assert!(result.host_flags.iter().all(|f| *f == 0.0));
        assert_eq!(result.uncertainty_radii.as_ref().map(Vec::len), Some(result.len()));

        for star in result.stars() {
            assert!(norm(star.position) <= DISTANCE_CAP_PC * (1.0 + 1e-6));
        }
    }
}

#[test]
fn test_rows_are_a_stable_filtering() {
    let request = PipelineRequest::new(random_catalog(5000, 3), 2016.0, 18.0);
    let result = seeded(5).run(&request).unwrap();

    assert!(result.len() <= request.len());
    assert!(result.source_indices.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(result.stats.input, request.len());
    assert_eq!(result.stats.emitted, result.len());
    assert_eq!(result.stats.emitted + result.stats.rejected(), request.len());
}

#[test]
fn test_far_sources_clamped_not_dropped() {
    // 1e-5 mas puts these at 100 Mpc, G = -5 keeps them well inside the limit
    let sources: Vec<_> = (0..20u64)
        .map(|i| CatalogSource::new(i, i as f64 * 18.0, 10.0, 1e-5, -5.0))
        .collect();
    let result = seeded(3)
        .run(&PipelineRequest::new(sources, 2016.0, 30.0))
        .unwrap();
    assert_eq!(result.len(), 20);
    for star in result.stars() {
        approx::assert_relative_eq!(norm(star.position), DISTANCE_CAP_PC, epsilon = 0.01);
    }
}

#[test]
fn test_nearby_bright_source_survives() {
    let sources = vec![CatalogSource::new(1u64, 0.0, 0.0, 2.0, 10.0)];
    for seed in 0..16 {
        let result = seeded(seed)
            .run(&PipelineRequest::new(sources.clone(), 2016.0, 15.0))
            .unwrap();
        assert_eq!(result.len(), 1, "seed {seed}");
        approx::assert_relative_eq!(norm(result.star(0).unwrap().position), 500.0, epsilon = 0.01);
    }
}

#[test]
fn test_negative_parallax_gives_no_rows() {
    let sources = vec![CatalogSource::new(1u64, 0.0, 0.0, -1.0, 10.0)];
    let result = seeded(0)
        .run(&PipelineRequest::new(sources, 2016.0, 15.0))
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.stats.invalid_parallax, 1);
}

#[test]
fn test_beyond_survey_limit_gives_no_rows() {
    // G = 25 is below the survey's detection floor
    let sources = vec![CatalogSource::new(1u64, 0.0, 0.0, 2.0, 25.0)];
    for seed in 0..16 {
        let result = seeded(seed)
            .run(&PipelineRequest::new(sources.clone(), 2016.0, 6.0))
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(result.stats.not_selected, 1, "seed {seed}");
        assert_eq!(result.stats.faded_out, 0);
    }
}

#[test]
fn test_same_seed_same_bytes() {
    let sources = Arc::new(random_catalog(5000, 4));
    let request = PipelineRequest::new(Arc::clone(&sources), 2025.5, 19.0);

    let first = seeded(99).run(&request).unwrap();
    let second = seeded(99).run(&request).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );

    let other = seeded(100).run(&request).unwrap();
    assert_ne!(first.source_indices, other.source_indices);
}

#[test]
fn test_sequential_matches_parallel() {
    let request = PipelineRequest::new(random_catalog(5000, 5), 2016.0, 20.0);

    let mut serial = PipelineConfig::seeded(21);
    serial.parallel = false;

    let mut parallel = PipelineConfig::seeded(21);
    parallel.min_parallel_batch = 1;
    parallel.chunk_size = 37;

    let serial = Pipeline::new(serial).unwrap().run(&request).unwrap();
    let parallel = Pipeline::new(parallel).unwrap().run(&request).unwrap();
    assert_eq!(serial, parallel);
}

#[test]
fn test_entropy_mode_keeps_invariants() {
    let mut config = PipelineConfig::default();
    config.random = RandomSource::Entropy;
    let pipeline = Pipeline::new(config).unwrap();

    let request = PipelineRequest::new(random_catalog(2000, 6), 2016.0, 20.0);
    let result = pipeline.run(&request).unwrap();
    assert_eq!(result.stats.emitted + result.stats.rejected(), 2000);
    assert!(result.positions.iter().all(|c| c.is_finite()));
}

#[test]
fn test_hosts_flagged_and_resolved() {
    let sources = random_catalog(2000, 7);
    let hosts: HostIndex = (0..2000u64).step_by(10).collect();
    let request = PipelineRequest::new(sources.clone(), 2016.0, 22.0).with_hosts(hosts);
    let result = seeded(8).run(&request).unwrap();

    assert!(result.host_flags.iter().any(|f| *f == 1.0));
    for (row, star) in result.stars().enumerate() {
        let source = result.source_for_row(row, &sources).unwrap();
        let expected = request.host_ids.contains(&source.source_id);
        assert_eq!(star.is_host, expected);
        assert_eq!(source.source_id, SourceId::from(star.source_index as u64));
    }
}

#[test]
fn test_request_message_end_to_end() {
    let json = r#"{
        "sources": [
            {"source_id": "4472832130942575872", "ra": 269.452, "dec": 4.693,
             "parallax": 546.98, "pmra": -801.55, "pmdec": 10362.39,
             "phot_g_mean_mag": 8.19, "bp_rp": 2.83},
            {"source_id": 2, "ra": 10.0, "dec": 10.0, "parallax": null,
             "phot_g_mean_mag": 9.0}
        ],
        "referenceYear": 2026.0,
        "magLimit": 14.0,
        "hostIds": ["4472832130942575872"]
    }"#;
    let request = PipelineRequest::from_json(json).unwrap();
    let result = seeded(1).run(&request).unwrap();

    assert_eq!(result.len(), 1);
    let star = result.star(0).unwrap();
    assert!(star.is_host);
    assert_eq!(star.source_index, 0);
    approx::assert_relative_eq!(norm(star.position), 1000.0 / 546.98, epsilon = 1e-4);
}
