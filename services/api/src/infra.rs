use bestfavour::catalog::{
    CatalogSource, CriteriaError, PriceRange, DEFAULT_MAX_PRICE, DEFAULT_MIN_PRICE,
};
use bestfavour::config::CatalogConfig;
use bestfavour::onboarding::DocumentUpload;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// A path given on the command line wins over `APP_CATALOG_PATH`.
pub(crate) fn catalog_source(path: Option<PathBuf>, config: &CatalogConfig) -> CatalogSource {
    match path {
        Some(path) => CatalogSource::Csv(path),
        None => CatalogSource::from_config(config),
    }
}

pub(crate) fn price_range(min: Option<f64>, max: Option<f64>) -> Result<PriceRange, CriteriaError> {
    PriceRange::new(
        min.unwrap_or(DEFAULT_MIN_PRICE),
        max.unwrap_or(DEFAULT_MAX_PRICE),
    )
}

/// Describes a local file the way the browser file picker would, guessing the
/// MIME type from the extension. Missing files report zero bytes.
pub(crate) fn document_upload(path: &Path) -> DocumentUpload {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let size_bytes = std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);

    DocumentUpload {
        file_name,
        mime_type,
        size_bytes,
    }
}
