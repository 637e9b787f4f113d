use crate::config::{BUNDLED_SOURCE, default_sample_source};

use std::path::PathBuf;

use recipe_box_core::SampleSource;
use serde::{Deserialize, Serialize};

/// Sample recipe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplesConfig {
    /// `"bundled"`, an `http(s)://` URL, or a path to a JSON file.
    #[serde(default = "default_sample_source")]
    pub source: String,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        Self {
            source: default_sample_source(),
        }
    }
}

impl SamplesConfig {
    /// Resolve the configured source string.
    pub fn origin(&self) -> SampleOrigin {
        let source = self.source.trim();

        if source.is_empty() || source == BUNDLED_SOURCE {
            SampleOrigin::Bundled
        } else if source.starts_with("http://") || source.starts_with("https://") {
            SampleOrigin::Remote(SampleSource::Url(source.to_string()))
        } else {
            SampleOrigin::Remote(SampleSource::File(PathBuf::from(source)))
        }
    }
}

/// Where the `samples` command gets its recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleOrigin {
    /// JSON document embedded in the binary.
    Bundled,
    /// Fetched from a URL or file at load time.
    Remote(SampleSource),
}
