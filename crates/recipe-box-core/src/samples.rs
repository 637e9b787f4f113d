//! Sample recipe documents.
//!
//! A sample document is a JSON array of partial recipes. Fetching either
//! yields the whole parsed batch or an error; nothing is merged on failure.

use crate::{CoreResult, RecipeError, recipe::SampleRecipe};

use std::{fmt, panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use tracing::{info, instrument};

/// Where sample recipes are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleSource {
    /// HTTP(S) endpoint serving the JSON document.
    Url(String),
    /// Local JSON file.
    File(PathBuf),
}

impl fmt::Display for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSource::Url(url) => f.write_str(url),
            SampleSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parse a sample document.
#[track_caller]
pub fn parse_samples(json: &str) -> CoreResult<Vec<SampleRecipe>> {
    serde_json::from_str(json).map_err(|source| RecipeError::SampleParse {
        source,
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Fetch and parse the sample document from `source`.
///
/// # Errors
///
/// Transport failures, non-success HTTP statuses and malformed JSON all
/// return an error.
pub async fn fetch(source: &SampleSource) -> CoreResult<Vec<SampleRecipe>> {
    fetch_with(&reqwest::Client::new(), source).await
}

/// [`fetch`] using a caller-supplied HTTP client for URL sources.
#[instrument(skip(client))]
pub async fn fetch_with(
    client: &reqwest::Client,
    source: &SampleSource,
) -> CoreResult<Vec<SampleRecipe>> {
    let caller = Location::caller();

    let body = match source {
        SampleSource::Url(url) => fetch_url(client, url, caller).await?,
        SampleSource::File(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| RecipeError::SampleFetch {
                    source_name: path.display().to_string(),
                    reason: e.to_string(),
                    location: ErrorLocation::from(caller),
                })?
        }
    };

    let samples = parse_samples(&body)?;

    info!(source = %source, count = samples.len(), "Sample recipes fetched");

    Ok(samples)
}

async fn fetch_url(
    client: &reqwest::Client,
    url: &str,
    caller: &'static Location<'static>,
) -> CoreResult<String> {
    let transport_error = |e: reqwest::Error| RecipeError::SampleFetch {
        source_name: url.to_string(),
        reason: e.to_string(),
        location: ErrorLocation::from(caller),
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(RecipeError::SampleStatus {
            url: url.to_string(),
            status: status.as_u16(),
            location: ErrorLocation::from(caller),
        });
    }

    response.text().await.map_err(transport_error)
}
