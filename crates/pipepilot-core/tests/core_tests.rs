use std::fs;
use std::io::Write;
use tempfile::TempDir;

use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use pipepilot_core::config::{resolve_with_base, Config, Settings};
use pipepilot_core::corpus::Corpus;
use pipepilot_core::passages::PassageSplitter;
use pipepilot_core::types::Document;
use pipepilot_core::Error;

fn doc(id: &str, embedding: Vec<f64>) -> Document {
    Document { id: id.to_string(), text: format!("text of {id}"), embedding }
}

#[test]
fn process_directory_single_small_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let mut f = fs::File::create(dir.join("a.txt")).unwrap();
    writeln!(f, "Short text").unwrap();

    let passages = PassageSplitter::new().process_directory(dir).expect("process");

    assert_eq!(passages.len(), 1, "one small paragraph becomes one passage");
    assert_eq!(passages[0].id, "a:0");
    assert_eq!(passages[0].text, "Short text");
}

#[test]
fn process_directory_drops_duplicate_passages() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(dir.join("a.txt"), "We fix water heaters.\n\nWe clear drains.").unwrap();
    fs::write(dir.join("b.txt"), "We clear drains.\n\nWe repair toilets.").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let passages = PassageSplitter::new().process_directory(dir).expect("process");
    let ids: Vec<&str> = passages.iter().map(|p| p.id.as_str()).collect();

    assert_eq!(ids, vec!["a:0", "a:1", "b:1"]);
}

#[test]
fn corpus_round_trips_through_disk() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data/embeddings.json");
    let corpus = Corpus::new(vec![doc("a", vec![1.0, 0.0]), doc("b", vec![0.0, 1.0])]).unwrap();
    corpus.save(&path).unwrap();

    let loaded = Corpus::load(&path).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.dim(), 2);
    assert_eq!(loaded.documents(), corpus.documents());
    assert_eq!(loaded.fingerprint().len(), 64);
    assert!(std::fs::read_to_string(&path).unwrap().starts_with("[\n  {"));
}

#[test]
fn corpus_rejects_mixed_dimensions() {
    let err = Corpus::new(vec![doc("a", vec![1.0, 0.0]), doc("b", vec![1.0, 0.0, 0.0])]).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 2, got: 3 }));
}

#[test]
fn missing_corpus_is_unavailable() {
    let tmp = TempDir::new().unwrap();
    let err = Corpus::load(&tmp.path().join("embeddings.json")).unwrap_err();
    assert!(matches!(err, Error::CorpusUnavailable(_)));
    assert!(err.to_string().ends_with("embeddings.json not found"));
}

#[test]
fn settings_layer_over_defaults() {
    let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string(
        r#"
        [server]
        port = 8080

        [openai]
        chat_model = "gpt-test"
        "#,
    ));
    let config = Config::from_figment(figment, "test").expect("config");
    let settings = config.settings().unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.openai.chat_model, "gpt-test");
    assert_eq!(settings.openai.embedding_model, "text-embedding-3-small");
    assert_eq!(settings.rag.top_k, 5);
    assert_eq!(config.get::<String>("data.corpus_path").unwrap(), "data/embeddings.json");
}

#[test]
fn zero_top_k_is_rejected() {
    let figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::string("[rag]\ntop_k = 0"));
    assert!(matches!(Config::from_figment(figment, "test"), Err(Error::InvalidConfig(_))));
}

#[test]
fn relative_paths_resolve_against_base() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(resolve_with_base(tmp.path(), "data/x.json"), tmp.path().join("data/x.json"));
    assert_eq!(resolve_with_base(tmp.path(), "/abs/x.json"), std::path::PathBuf::from("/abs/x.json"));
}
