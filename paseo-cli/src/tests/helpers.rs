//! Fixture files and stub providers shared by the plan tests.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use paseo_core::{DirectionsError, DirectionsProvider};
use paseo_data::directions::test_support::StubDirectionsProvider;
use std::cell::RefCell;
use tempfile::TempDir;

/// Catalog with one museum, one temple and one restaurant near the centre
/// of Querétaro, plus a museum in Mexico City that sanitizing rejects.
pub(super) const PLACES_JSON: &str = r#"[
    {"id": "m1", "Nombre": "Museo Regional", "Categoria": "Museo", "Latitud": "20.5930", "Longitud": "-100.3920"},
    {"id": "t1", "Nombre": "Templo de San Francisco", "Categoria": "Templo", "Latitud": 20.5925, "Longitud": -100.3905},
    {"id": "r1", "Nombre": "Restaurante Bajío", "Categoria": "Restaurante", "Latitud": "20,5960", "Longitud": "-100,3950"},
    {"id": "x1", "Nombre": "Museo Nacional", "Categoria": "Museo", "Latitud": 19.4326, "Longitud": -99.1332}
]"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// Plan request JSON from Jardín Zenea to Alameda Hidalgo.
pub(super) fn request_json(categories: &[&str]) -> String {
    serde_json::json!({
        "origin": {"name": "Jardín Zenea", "Latitud": "20.5888", "Longitud": "-100.3899"},
        "destination": {"name": "Alameda Hidalgo", "latitude": 20.5882, "longitude": -100.3934},
        "categories": categories,
    })
    .to_string()
}

/// A temporary directory holding a plan request and a place catalog.
#[derive(Debug)]
pub(super) struct PlanFiles {
    _dir: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) request: Utf8PathBuf,
    pub(super) places: Utf8PathBuf,
}

impl PlanFiles {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let request = root.join("request.json");
        let places = root.join("places.json");
        Self {
            _dir: dir,
            root,
            request,
            places,
        }
    }

    pub(super) fn write_defaults(&self, categories: &[&str]) {
        write_utf8(&self.request, request_json(categories).as_bytes());
        write_utf8(&self.places, PLACES_JSON.as_bytes());
    }

    pub(super) fn args(&self) -> plan::PlanArgs {
        plan::PlanArgs {
            request_path: Some(self.request.clone()),
            places: Some(self.places.clone()),
            ..plan::PlanArgs::default()
        }
    }
}

/// Builds stub providers and records the configuration it was handed.
#[derive(Debug, Default)]
pub(super) struct StubProviderBuilder {
    pub(super) failure: Option<DirectionsError>,
    pub(super) seen: RefCell<Option<PlanConfig>>,
}

impl StubProviderBuilder {
    pub(super) fn failing(error: DirectionsError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }
}

impl PlanProviderBuilder for StubProviderBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn DirectionsProvider>, CliError> {
        self.seen.replace(Some(config.clone()));
        let provider = match &self.failure {
            Some(error) => StubDirectionsProvider::with_error(error.clone()),
            None => StubDirectionsProvider::walking(),
        };
        Ok(Box::new(provider))
    }
}
