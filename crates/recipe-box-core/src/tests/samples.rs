use crate::{
    MemoryStorage, RecipeError, RecipeStore,
    samples::{SampleSource, fetch, fetch_with, parse_samples},
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

const SAMPLE_JSON: &str = r#"[
    {"id": "sample-goulash", "title": "Goulash", "category": "Soup", "steps": ["brown", "simmer"]},
    {"title": "Pancakes", "category": "Dessert", "isFavorite": true}
]"#;

/// WHAT: A well-formed document parses into partial recipes
/// WHY: Missing ids and flags are allowed in sample data
#[test]
#[allow(clippy::unwrap_used)]
fn given_sample_document_when_parsing_then_partial_recipes_returned() {
    // Given: A document with one id-carrying and one id-less sample

    // When: Parsing
    let samples = parse_samples(SAMPLE_JSON).unwrap();

    // Then: Both are present with their optional parts
    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].id.as_ref().map(|id| id.as_str()), Some("sample-goulash"));
    assert_eq!(samples[0].draft.steps, vec!["brown", "simmer"]);
    assert_eq!(samples[1].id, None);
    assert!(samples[1].is_favorite);
}

/// WHAT: A document that is not an array is rejected
/// WHY: Malformed samples abort the merge with no partial effect
#[test]
fn given_non_array_document_when_parsing_then_sample_parse_error() {
    // Given: A JSON object instead of an array
    let json = r#"{"title": "Soup"}"#;

    // When: Parsing
    let result = parse_samples(json);

    // Then: SampleParse error
    assert!(matches!(result, Err(RecipeError::SampleParse { .. })));
}

/// WHAT: Samples are fetched from a local file source
/// WHY: Offline installs ship sample data on disk
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_file_source_when_fetching_then_samples_loaded() {
    // Given: A sample file on disk
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample-recipes.json");
    std::fs::write(&path, SAMPLE_JSON).unwrap();

    // When: Fetching and merging into an empty store
    let samples = fetch(&SampleSource::File(path)).await.unwrap();
    let mut store = RecipeStore::open(MemoryStorage::new(), "recipes");
    let added = store.merge_samples(samples);

    // Then: Both samples were added
    assert_eq!(added, 2);
    assert_eq!(store.categories(), vec!["Soup".to_string(), "Dessert".to_string()]);
}

/// WHAT: A missing sample file is a fetch error
/// WHY: Transport failures must be reported, not merged as empty
#[tokio::test]
async fn given_missing_file_when_fetching_then_sample_fetch_error() {
    // Given: A path that does not exist
    let source = SampleSource::File("/nonexistent/sample-recipes.json".into());

    // When: Fetching
    let result = fetch(&source).await;

    // Then: SampleFetch error
    assert!(matches!(result, Err(RecipeError::SampleFetch { .. })));
}

/// Serve `response` verbatim to the first connection and return the URL.
#[allow(clippy::unwrap_used)]
async fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = stream.read(&mut request).await;
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    format!("http://{addr}/sample-recipes.json")
}

#[allow(clippy::unwrap_used)]
fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// WHAT: A non-success HTTP status is reported with its code
/// WHY: A failed response must abort the merge instead of being parsed
#[tokio::test]
async fn given_endpoint_answering_404_when_fetching_then_sample_status_error() {
    // Given: A local endpoint that answers 404
    let url = serve_once(
        "HTTP/1.1 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
    )
    .await;

    // When: Fetching from it
    let result = fetch_with(&direct_client(), &SampleSource::Url(url)).await;

    // Then: SampleStatus with the code
    assert!(matches!(
        result,
        Err(RecipeError::SampleStatus { status: 404, .. })
    ));
}

/// WHAT: A successful HTTP response is parsed into samples
/// WHY: Remote sample documents are the normal source
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_endpoint_serving_document_when_fetching_then_samples_parsed() {
    // Given: A local endpoint serving a one-recipe document
    let url = serve_once(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 28\r\nconnection: close\r\n\r\n[{\"title\": \"Gazpacho Soup\"}]",
    )
    .await;

    // When: Fetching from it
    let samples = fetch_with(&direct_client(), &SampleSource::Url(url))
        .await
        .unwrap();

    // Then: The sample is returned
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].draft.title, "Gazpacho Soup");
}

/// WHAT: An unreachable endpoint is a fetch error
/// WHY: Network failures must abort the merge with no partial effect
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_closed_port_when_fetching_then_sample_fetch_error() {
    // Given: A port that was bound and released
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    // When: Fetching from it
    let result = fetch_with(
        &direct_client(),
        &SampleSource::Url(format!("http://{addr}/sample-recipes.json")),
    )
    .await;

    // Then: SampleFetch naming the URL
    assert!(matches!(
        result,
        Err(RecipeError::SampleFetch { source_name, .. }) if source_name.contains(&addr.to_string())
    ));
}
