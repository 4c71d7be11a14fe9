//! Behaviour every backend must share. Each test runs against all of them.

mod common;

use common::{frame, meta, stores};
use videovec::domain::error::{DomainError, ErrorKind};
use videovec::domain::values::vector_type::VectorType;

#[test]
fn test_add_then_get_returns_same_values() {
    for store in stores(3, 10, 0.8) {
        let m = meta("a", "video-1", VectorType::Frame)
            .with_timestamp(12.5)
            .with_attribute("shot", serde_json::json!(4));
        store.add("a", &[0.1, 0.2, 0.3], m.clone()).unwrap();

        let record = store.get("a").unwrap();
        assert_eq!(record.vector, vec![0.1, 0.2, 0.3]);
        assert_eq!(record.metadata, m);
        assert_eq!(store.size().unwrap(), 1);
    }
}

#[test]
fn test_wrong_dimension_rejected_by_add_and_search() {
    for store in stores(3, 10, 0.8) {
        store.add("a", &[1.0, 0.0, 0.0], meta("a", "v", VectorType::Frame)).unwrap();

        let err = store.add("b", &[1.0, 0.0], meta("b", "v", VectorType::Frame)).unwrap_err();
        match err {
            DomainError::DimensionMismatch { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = store.search(&[1.0, 0.0, 0.0, 0.0], 5, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert!(err.to_string().contains("expected 3"));
        assert!(err.to_string().contains("got 4"));
        assert_eq!(store.size().unwrap(), 1);
    }
}

#[test]
fn test_non_finite_component_rejected() {
    for store in stores(2, 10, 0.8) {
        let err = store.add("a", &[f32::NAN, 1.0], meta("a", "v", VectorType::Frame)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(store.size().unwrap(), 0);
    }
}

#[test]
fn test_metadata_id_must_match_key() {
    for store in stores(2, 10, 0.8) {
        let err = store.add("a", &[1.0, 1.0], meta("b", "v", VectorType::Frame)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(store.size().unwrap(), 0);
    }
}

#[test]
fn test_get_missing_is_not_found() {
    for store in stores(2, 10, 0.8) {
        let err = store.get("ghost").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

#[test]
fn test_delete_is_idempotent() {
    for store in stores(2, 10, 0.8) {
        store.add("a", &[1.0, 0.0], meta("a", "v", VectorType::Frame)).unwrap();
        store.add("b", &[0.0, 1.0], meta("b", "v", VectorType::Frame)).unwrap();

        store.delete("nonexistent").unwrap();
        assert_eq!(store.size().unwrap(), 2);

        store.delete("a").unwrap();
        assert_eq!(store.size().unwrap(), 1);
        assert_eq!(store.get("a").unwrap_err().kind(), ErrorKind::NotFound);

        store.delete("a").unwrap();
        assert_eq!(store.size().unwrap(), 1);
    }
}

#[test]
fn test_clear_always_empties() {
    for store in stores(2, 10, 0.8) {
        store.clear().unwrap();
        assert_eq!(store.size().unwrap(), 0);

        for i in 0..5 {
            let id = format!("v{i}");
            store.add(&id, &[i as f32, 1.0], meta(&id, "v", VectorType::Frame)).unwrap();
        }
        store.clear().unwrap();
        assert_eq!(store.size().unwrap(), 0);
        assert!(store.records().unwrap().is_empty());
        assert!(store.search(&[1.0, 1.0], 10, Some(-1.0)).unwrap().is_empty());
    }
}

#[test]
fn test_capacity_exceeded_keeps_size() {
    for store in stores(2, 3, 0.8) {
        for i in 0..3 {
            let id = format!("v{i}");
            store.add(&id, &[1.0, i as f32], meta(&id, "v", VectorType::Frame)).unwrap();
        }
        let err = store.add("extra", &[1.0, 1.0], meta("extra", "v", VectorType::Frame)).unwrap_err();
        match err {
            DomainError::CapacityExceeded { max } => assert_eq!(max, 3),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.size().unwrap(), 3);
        assert_eq!(store.get("extra").unwrap_err().kind(), ErrorKind::NotFound);
    }
}

#[test]
fn test_duplicate_id_overwrites_even_when_full() {
    for store in stores(2, 2, 0.8) {
        store.add("a", &[1.0, 0.0], meta("a", "v1", VectorType::Frame)).unwrap();
        store.add("b", &[0.0, 1.0], meta("b", "v1", VectorType::Frame)).unwrap();

        let replacement = meta("a", "v2", VectorType::Scene).with_timestamp(3.0);
        store.add("a", &[0.5, 0.5], replacement.clone()).unwrap();

        assert_eq!(store.size().unwrap(), 2);
        let record = store.get("a").unwrap();
        assert_eq!(record.vector, vec![0.5, 0.5]);
        assert_eq!(record.metadata, replacement);
    }
}

#[test]
fn test_scenario_threshold_and_capacity() {
    for store in stores(3, 2, 0.5) {
        let meta_a = meta("a", "video", VectorType::Frame);
        store.add("a", &[1.0, 0.0, 0.0], meta_a.clone()).unwrap();
        store.add("b", &[0.0, 1.0, 0.0], meta("b", "video", VectorType::Frame)).unwrap();

        let hits = store.search(&[1.0, 0.0, 0.0], 2, Some(0.5)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].vector_id, "a");
        assert!((hits[0].score - 1.0).abs() < 1e-6);
        assert_eq!(hits[0].metadata, meta_a);

        let err = store.add("c", &[1.0, 0.0, 0.0], meta("c", "video", VectorType::Frame)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

        store.delete("nonexistent").unwrap();
        assert_eq!(store.size().unwrap(), 2);
    }
}

#[test]
fn test_search_is_sorted_bounded_and_thresholded() {
    for store in stores(2, 100, 0.0) {
        for i in 0..20 {
            let angle = i as f32 * 0.15;
            let id = format!("v{i}");
            store
                .add(&id, &[angle.cos(), angle.sin()], meta(&id, "v", VectorType::Frame))
                .unwrap();
        }

        let hits = store.search(&[1.0, 0.0], 5, Some(0.3)).unwrap();
        assert!(hits.len() <= 5);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|h| h.score >= 0.3));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(hits[0].vector_id, "v0");
    }
}

#[test]
fn test_search_uses_configured_threshold_by_default() {
    for store in stores(2, 10, 0.9) {
        store.add("near", &[1.0, 0.1], meta("near", "v", VectorType::Frame)).unwrap();
        store.add("far", &[1.0, 1.0], meta("far", "v", VectorType::Frame)).unwrap();

        let hits = store.search(&[1.0, 0.0], 10, None).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].vector_id, "near");

        let hits = store.search(&[1.0, 0.0], 10, Some(0.5)).unwrap();
        assert_eq!(hits.len(), 2);
    }
}

#[test]
fn test_search_empty_store_returns_nothing() {
    for store in stores(4, 10, 0.8) {
        assert!(store.search(&[1.0, 2.0, 3.0, 4.0], 10, None).unwrap().is_empty());
    }
}

#[test]
fn test_zero_query_scores_zero() {
    for store in stores(2, 10, 0.8) {
        store.add("a", &[1.0, 0.0], meta("a", "v", VectorType::Frame)).unwrap();
        assert!(store.search(&[0.0, 0.0], 10, None).unwrap().is_empty());

        let hits = store.search(&[0.0, 0.0], 10, Some(0.0)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 0.0);
    }
}

#[test]
fn test_search_threshold_out_of_range_rejected() {
    for store in stores(2, 10, 0.8) {
        let err = store.search(&[1.0, 0.0], 10, Some(1.5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

#[test]
fn test_top_k_zero_returns_nothing() {
    for store in stores(2, 10, 0.0) {
        store.add("a", &[1.0, 0.0], meta("a", "v", VectorType::Frame)).unwrap();
        assert!(store.search(&[1.0, 0.0], 0, None).unwrap().is_empty());
    }
}

#[test]
fn test_non_finite_timestamp_rejected() {
    for store in stores(2, 10, 0.8) {
        for ts in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let m = meta("a", "v", VectorType::Frame).with_timestamp(ts);
            let err = store.add("a", &[1.0, 1.0], m).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(store.size().unwrap(), 0);
    }
}

#[test]
fn test_float_attributes_survive_storage_exactly() {
    let values = [1.079907802215119e-66, 0.1 + 0.2, 2.0_f64.sqrt(), -7.123456789012345e300, 5e-324];
    for store in stores(2, 10, 0.8) {
        let mut m = meta("a", "v", VectorType::Object).with_timestamp(1.0 / 3.0);
        for (i, v) in values.iter().enumerate() {
            m = m.with_attribute(format!("f{i}"), serde_json::json!(v));
        }
        store.add("a", &[1.0, 0.0], m.clone()).unwrap();
        assert_eq!(store.get("a").unwrap().metadata, m);
    }
}

#[test]
fn test_add_batch_is_all_or_nothing() {
    for store in stores(2, 3, 0.8) {
        store.add("a", &[1.0, 0.0], meta("a", "v", VectorType::Frame)).unwrap();

        // "a" is a replacement, so only "b" and "c" need room.
        let fits = vec![
            frame("a", "v", vec![0.0, 1.0]),
            frame("b", "v", vec![1.0, 1.0]),
            frame("c", "v", vec![1.0, 2.0]),
        ];
        assert_eq!(store.add_batch(fits).unwrap(), 3);
        assert_eq!(store.size().unwrap(), 3);
        assert_eq!(store.get("a").unwrap().vector, vec![0.0, 1.0]);

        store.clear().unwrap();
        let too_many = (0..4).map(|i| frame(&format!("v{i}"), "v", vec![1.0, i as f32])).collect();
        let err = store.add_batch(too_many).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
        assert_eq!(store.size().unwrap(), 0);

        let one_bad = vec![frame("x", "v", vec![1.0, 0.0]), frame("y", "v", vec![1.0])];
        let err = store.add_batch(one_bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(store.size().unwrap(), 0);
    }
}
