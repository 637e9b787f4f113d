use error_location::ErrorLocation;
use thiserror::Error;

/// Recipe library errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Durable storage could not be read or written.
    #[error("Storage error for key '{key}': {source} {location}")]
    Storage {
        /// Storage key involved in the failed operation.
        key: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The recipe collection could not be serialized or deserialized.
    #[error("Serialization error: {source} {location}")]
    Serialization {
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sample data could not be fetched.
    #[error("Sample fetch failed from {source_name}: {reason} {location}")]
    SampleFetch {
        /// URL or path of the sample document.
        source_name: String,
        /// Description of the transport failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sample endpoint answered with a non-success status.
    #[error("Sample endpoint {url} returned HTTP {status} {location}")]
    SampleStatus {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Sample document is not a JSON array of recipes.
    #[error("Sample data is malformed: {source} {location}")]
    SampleParse {
        /// Underlying serde_json error.
        #[source]
        source: serde_json::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Speech backend failed to speak or cancel.
    #[error("Speech backend error: {reason} {location}")]
    Speech {
        /// Description of the backend failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`RecipeError`].
pub type Result<T> = std::result::Result<T, RecipeError>;
