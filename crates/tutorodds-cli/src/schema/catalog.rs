use serde::{Deserialize, Serialize};
use tutorodds_analysis::catalog::{CatalogError, Strategy, StrategyCatalog};

/// On-disk form of a strategy catalog.
///
/// ```json
/// {
///   "strategies": [
///     { "id": 2, "name": "Ask_a_question", "label": "Ask Question to Guide Thinking" },
///     { "id": 9, "name": "Retry" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogFile {
    pub strategies: Vec<Strategy>,
}

impl CatalogFile {
    pub fn from_catalog(catalog: &StrategyCatalog) -> Self {
        Self {
            strategies: catalog.strategies().cloned().collect(),
        }
    }

    pub fn into_catalog(self) -> Result<StrategyCatalog, CatalogError> {
        StrategyCatalog::new(self.strategies)
    }
}
