use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub recognition: RecognitionSettings,
    pub export: ExportConfig,
    pub delivery: DeliveryConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionSettings {
    /// Recognition locale (e.g. "en-US")
    pub locale: String,

    /// Backend source: "native" probes the host engine, "file:<path>" replays
    /// a transcript fixture line by line
    pub source: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    /// Directory the exported note is written into
    pub output_dir: String,

    /// Fixed export filename
    pub filename: String,
}

/// EmailJS credentials: three opaque identifiers plus the REST endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub api_url: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
