use pipepilot_core::corpus::Corpus;
use pipepilot_core::types::Document;
use pipepilot_core::Error;
use pipepilot_vector::{cosine, rank, CorpusCache, DEFAULT_TOP_K};
use proptest::prelude::*;

fn doc(id: &str, embedding: Vec<f64>) -> Document {
    Document { id: id.to_string(), text: format!("passage {id}"), embedding }
}

#[test]
fn query_equal_to_document_ranks_it_first() {
    let docs = vec![doc("a", vec![0.2, 0.9, 0.1]), doc("b", vec![0.9, 0.1, 0.3])];
    let ranked = rank(&[0.2, 0.9, 0.1], &docs, DEFAULT_TOP_K).unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].id, "a");
    assert!((ranked[0].score - 1.0).abs() < 1e-9);
    assert_eq!(ranked[0].text, "passage a");
    assert!(ranked[1].score < ranked[0].score);
}

#[test]
fn keeps_only_top_k() {
    let docs: Vec<Document> = (0..8).map(|i| doc(&format!("d{i}"), vec![1.0, f64::from(i)])).collect();
    let ranked = rank(&[0.0, 1.0], &docs, 5).unwrap();
    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["d7", "d6", "d5", "d4", "d3"]);
}

#[test]
fn ties_preserve_corpus_order() {
    let docs = vec![
        doc("first", vec![1.0, 0.0]),
        doc("other", vec![0.0, 1.0]),
        doc("second", vec![1.0, 0.0]),
        doc("third", vec![1.0, 0.0]),
    ];
    let ranked = rank(&[1.0, 0.0], &docs, 10).unwrap();
    let ids: Vec<&str> = ranked.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third", "other"]);
}

#[test]
fn dimension_mismatch_fails() {
    let docs = vec![doc("a", vec![1.0, 0.0, 0.0])];
    assert!(matches!(rank(&[1.0, 0.0], &docs, 5), Err(Error::DimensionMismatch { .. })));
}

#[test]
fn empty_corpus_ranks_to_nothing() {
    assert!(rank(&[1.0, 0.0], &[], 5).unwrap().is_empty());
}

#[test]
fn cache_loads_once_and_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("embeddings.json");

    let cache = CorpusCache::new(&path);
    assert!(matches!(cache.get_or_load(), Err(Error::CorpusUnavailable(_))));
    assert!(!cache.is_loaded());

    Corpus::new(vec![doc("a", vec![1.0, 0.0])]).unwrap().save(&path).unwrap();
    let first = cache.get_or_load().unwrap();
    std::fs::remove_file(&path).unwrap();
    let second = cache.get_or_load().expect("served from memory after first load");

    assert!(cache.is_loaded());
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn missing_file_is_reported_by_label() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = CorpusCache::new(tmp.path().join("data/embeddings.json")).with_label("data/embeddings.json");

    let err = cache.get_or_load().unwrap_err();

    assert_eq!(err.to_string(), "data/embeddings.json not found");
}

fn vector(dim: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, dim)
}

proptest! {
    #[test]
    fn self_similarity_is_one(a in vector(8)) {
        prop_assume!(a.iter().any(|x| x.abs() > 1.0));
        let s = cosine(&a, &a).unwrap();
        prop_assert!((s - 1.0).abs() < 1e-9, "score(a,a) = {}", s);
    }

    #[test]
    fn cosine_is_symmetric(a in vector(8), b in vector(8)) {
        prop_assert_eq!(cosine(&a, &b).unwrap(), cosine(&b, &a).unwrap());
    }

    #[test]
    fn cosine_stays_in_range(a in vector(8), b in vector(8)) {
        let s = cosine(&a, &b).unwrap();
        prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&s));
    }

    #[test]
    fn ranking_is_non_increasing(q in vector(4), embeddings in prop::collection::vec(vector(4), 0..20)) {
        let docs: Vec<Document> = embeddings.into_iter().enumerate().map(|(i, e)| doc(&i.to_string(), e)).collect();
        let ranked = rank(&q, &docs, docs.len()).unwrap();
        prop_assert_eq!(ranked.len(), docs.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
