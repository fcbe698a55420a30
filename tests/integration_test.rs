//! End-to-end tests: ingest a corpus directory, embed it with the
//! offline hash provider, and query the engine through the public API.

use std::fs;
use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use triagex::prelude::*;

const CSV_HEADER: &str = "Issue,Category,Description,Resolution,Resolved\n";

fn write_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    let mut file = fs::File::create(path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
}

fn sample_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "network.csv",
        &format!(
            "{CSV_HEADER}\
             VPN drops,network,tunnel dies every hour,Restart the VPN client,true\n\
             Wifi dead,network,no access points visible,Toggle airplane mode,true\n\
             Slow uploads,network,transfers crawl,Open a ticket with the ISP,false\n"
        ),
    );
    write_file(
        &dir,
        "hardware.tsv",
        "Issue\tCategory\tDescription\tResolution\tResolved\n\
         Printer jams\thardware\tpaper stuck daily\tClean the rollers\t1\n",
    );
    write_file(
        &dir,
        "software.json",
        r#"[
            {"Issue": "Outlook crash", "Category": "software", "Description": "crashes on startup", "Resolution": "Rebuild the mail profile", "Resolved": true},
            {"Issue": "License popup", "Category": "software", "Description": "activation nag", "Resolution": "Re-enter the license key", "Resolved": "no"}
        ]"#,
    );
    dir
}

async fn build_engine(dir: &TempDir) -> RecommendationEngine {
    EngineBuilder::new(Arc::new(HashEmbedder::default()))
        .corpus_dir(dir.path())
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_corpus_keeps_only_resolved_rows() {
    let dir = sample_corpus();
    let engine = build_engine(&dir).await;

    // 6 rows across three formats, 4 of them resolved.
    assert_eq!(engine.corpus().len(), 4);
    assert_eq!(
        engine.corpus().categories(),
        vec!["hardware", "network", "software"]
    );
}

#[tokio::test]
async fn test_identical_query_returns_full_confidence_value() {
    let dir = TempDir::new().unwrap();
    write_file(
        &dir,
        "one.csv",
        &format!("{CSV_HEADER}Machine hangs,hardware,freezes on login,Reboot,true\n"),
    );
    let engine = build_engine(&dir).await;

    let result = engine
        .recommend(
            TicketFields::new("Machine hangs", "hardware", "freezes on login"),
            Mode::Value,
        )
        .await
        .unwrap();
    assert_eq!(result, Recommendation::Value("Reboot (100%)".to_string()));
}

#[tokio::test]
async fn test_nearest_ticket_wins() {
    let dir = sample_corpus();
    let engine = build_engine(&dir).await;

    let result = engine
        .recommend(
            TicketFields::new("VPN drops", "network", "tunnel dies every hour"),
            Mode::Solution,
        )
        .await
        .unwrap();
    assert_eq!(
        result,
        Recommendation::Solution("Restart the VPN client".to_string())
    );
}

#[tokio::test]
async fn test_ranked_output_is_exhaustive_and_sorted() {
    let dir = sample_corpus();
    let engine = build_engine(&dir).await;

    let result = engine
        .recommend(
            TicketFields::new("Printer jams", "hardware", "paper stuck daily"),
            Mode::Ranked,
        )
        .await
        .unwrap();
    let Recommendation::Ranked(candidates) = result else {
        panic!("expected ranked output");
    };

    assert_eq!(candidates.len(), 4);
    assert_eq!(candidates[0].resolution, "Clean the rollers");
    assert!(candidates
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[tokio::test]
async fn test_invalid_mode_string_is_rejected() {
    let parsed = "bogus".parse::<Mode>();
    assert!(matches!(parsed, Err(Error::InvalidMode(m)) if m == "bogus"));
}

#[tokio::test]
async fn test_empty_corpus_directory_fails_at_query_time() {
    let dir = TempDir::new().unwrap();
    let engine = build_engine(&dir).await;

    assert!(engine.corpus().is_empty());
    let result = engine
        .recommend(TicketFields::new("a", "b", "c"), Mode::Solution)
        .await;
    assert!(matches!(result, Err(Error::EmptyCorpus)));
}

#[tokio::test]
async fn test_missing_corpus_directory_fails_at_build_time() {
    let dir = TempDir::new().unwrap();
    let result = EngineBuilder::new(Arc::new(HashEmbedder::default()))
        .corpus_dir(dir.path().join("missing"))
        .build()
        .await;
    assert!(matches!(result, Err(Error::Io(_))));
}

#[tokio::test]
async fn test_corrupt_source_file_fails_whole_ingestion() {
    let dir = sample_corpus();
    write_file(&dir, "broken.csv", "Issue,Category\nhalf,a row\n");

    let result = EngineBuilder::new(Arc::new(HashEmbedder::default()))
        .corpus_dir(dir.path())
        .build()
        .await;
    assert!(matches!(result, Err(Error::Schema { .. })));
}

#[tokio::test]
async fn test_examples_are_loaded_but_not_scored() {
    let dir = sample_corpus();
    let examples_dir = TempDir::new().unwrap();
    write_file(
        &examples_dir,
        "examples.csv",
        "Issue,Category,Description\nNew laptop slow,hardware,boot takes minutes\n",
    );

    let engine = EngineBuilder::new(Arc::new(HashEmbedder::default()))
        .corpus_dir(dir.path())
        .examples_path(examples_dir.path().join("examples.csv"))
        .build()
        .await
        .unwrap();

    assert_eq!(engine.examples().len(), 1);
    assert_eq!(engine.examples()[0].issue, "New laptop slow");
    // The held-out batch never becomes part of the scoring corpus.
    assert_eq!(engine.corpus().len(), 4);
}

#[tokio::test]
async fn test_query_embeds_like_corpus_records() {
    let dir = sample_corpus();
    let engine = build_engine(&dir).await;

    // Same query twice must give identical scores with the
    // deterministic provider.
    let query = TicketFields::new("Outlook crash", "software", "crashes on startup");
    let first = engine.recommend(query.clone(), Mode::Ranked).await.unwrap();
    let second = engine.recommend(query, Mode::Ranked).await.unwrap();
    assert_eq!(first, second);
}
