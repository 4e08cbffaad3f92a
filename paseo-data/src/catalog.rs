//! Place catalog loading.
//!
//! The place-listing backend serves a JSON array of place records. Records
//! are decoded one at a time so a single bad entry is dropped with a warning
//! instead of failing the whole catalog; only a payload that is not a JSON
//! array at all is fatal.

use std::io::Read;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use log::{debug, warn};
use paseo_core::{PlaceRecord, SanitizeReport, ServiceArea, sanitize_records};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Path segment of the place listing relative to the backend base URL.
pub const PLACES_PATH: &str = "lugares";

/// Default timeout for catalog downloads in seconds.
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 10;

/// Errors raised while loading a place catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be opened or read.
    #[error("failed to read place catalog {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The payload is not a JSON array.
    #[error("place catalog is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),
    /// The backend base URL is invalid.
    #[error("invalid catalog base URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The backend could not be reached or answered with an error status.
    #[error("failed to fetch place catalog from {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Decode a JSON array of place records from `reader` and sanitize it.
///
/// Entries that do not decode as a place record are skipped with a warning.
/// Decoded records that fail validation end up in
/// [`SanitizeReport::rejected`].
///
/// # Errors
/// Returns [`CatalogError::Parse`] when the payload is not a JSON array.
///
/// # Examples
/// ```
/// use paseo_core::ServiceArea;
/// use paseo_data::catalog::load_candidate_pool;
///
/// let json = r#"[
///     {"id": 1, "Nombre": "Museo Regional", "Categoria": "Museo", "Latitud": "20.595", "Longitud": -100.395},
///     {"id": 2, "Nombre": "Fuera", "Categoria": "Museo", "Latitud": 19.43, "Longitud": -99.13}
/// ]"#;
/// let report = load_candidate_pool(json.as_bytes(), &ServiceArea::default()).unwrap();
/// assert_eq!(report.pool.len(), 1);
/// assert_eq!(report.rejected.len(), 1);
/// ```
pub fn load_candidate_pool<R: Read>(
    reader: R,
    area: &ServiceArea,
) -> Result<SanitizeReport, CatalogError> {
    let entries: Vec<Value> = serde_json::from_reader(reader)?;
    Ok(sanitize_entries(entries, area))
}

/// Open the catalog file at `path` and load it.
///
/// # Errors
/// Returns [`CatalogError::Io`] when the file cannot be opened and
/// [`CatalogError::Parse`] when its content is not a JSON array.
pub fn open_candidate_pool(
    path: &Utf8Path,
    area: &ServiceArea,
) -> Result<SanitizeReport, CatalogError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let report = load_candidate_pool(std::io::BufReader::new(file), area)?;
    debug!(
        "loaded {} place(s) from {path}, rejected {}",
        report.pool.len(),
        report.rejected.len()
    );
    Ok(report)
}

fn sanitize_entries(entries: Vec<Value>, area: &ServiceArea) -> SanitizeReport {
    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<PlaceRecord>(entry) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("skipping undecodable place record at index {index}: {err}");
                None
            }
        });
    sanitize_records(records, area)
}

/// HTTP client for the place-listing backend.
#[derive(Debug, Clone)]
pub struct PlaceCatalogClient {
    client: Client,
    places_url: Url,
}

impl PlaceCatalogClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns an error when `base_url` is not a valid URL or the HTTP
    /// client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let invalid = |source: url::ParseError| CatalogError::InvalidUrl {
            url: base_url.to_owned(),
            source,
        };
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(invalid)?;
        let places_url = base.join(PLACES_PATH).map_err(invalid)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::HttpClient)?;
        Ok(Self { client, places_url })
    }

    /// The listing URL requested by [`fetch`](Self::fetch).
    #[must_use]
    pub const fn places_url(&self) -> &Url {
        &self.places_url
    }

    /// Download and sanitize the place listing.
    ///
    /// # Errors
    /// Returns [`CatalogError::Fetch`] when the request fails or the backend
    /// answers with an error status, and [`CatalogError::Parse`] when the
    /// body is not a JSON array.
    pub async fn fetch(&self, area: &ServiceArea) -> Result<SanitizeReport, CatalogError> {
        debug!("fetching place catalog from {}", self.places_url);
        let fetch_error = |err: reqwest::Error| CatalogError::Fetch {
            url: self.places_url.to_string(),
            message: err.without_url().to_string(),
        };
        let body = self
            .client
            .get(self.places_url.clone())
            .send()
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?
            .bytes()
            .await
            .map_err(fetch_error)?;
        load_candidate_pool(body.as_ref(), area)
    }
}
