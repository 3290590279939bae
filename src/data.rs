use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{EsError, EsResult};

pub mod esg;
pub mod price;

pub use esg::{EsgRecord, EsgTable, load_esg};
pub use price::{PriceSeries, load_prices};

/// Names of the source columns the loader looks up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub identifier: String,
    pub esg_score: String,
    pub date: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            identifier: "Symbol".to_string(),
            esg_score: "Total ESG Risk score".to_string(),
            date: "Date".to_string(),
        }
    }
}

pub(crate) fn csv_reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.has_headers(true).flexible(true).trim(Trim::All);
    builder
}

pub(crate) fn ensure_file(path: &Path) -> EsResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EsError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

pub(crate) fn column_index(headers: &StringRecord, name: &str) -> EsResult<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        .ok_or_else(|| EsError::DataFormat {
            code: "MISSING_COLUMN",
            message: format!("Column '{name}' not found"),
        })
}
