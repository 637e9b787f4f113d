#[allow(clippy::module_inception)]
mod config;
mod samples_config;
mod speech_config;
mod storage_config;

pub(crate) use {
    config::Config,
    samples_config::{SampleOrigin, SamplesConfig},
    speech_config::SpeechConfig,
    storage_config::StorageConfig,
};

pub(crate) const BUNDLED_SOURCE: &str = "bundled";
pub(crate) const DEFAULT_SPEECH_COMMAND: &str = "espeak-ng";

pub(crate) fn default_storage_key() -> String {
    recipe_box_core::DEFAULT_STORAGE_KEY.to_string()
}

pub(crate) fn default_sample_source() -> String {
    BUNDLED_SOURCE.to_string()
}
