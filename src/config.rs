use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    data::ColumnNames,
    error::{EsError, EsResult},
    utils::datetime::{date_from_str, date_to_str},
};

pub static APP_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub esg_identifier_column: String,
    pub esg_score_column: String,
    pub price_date_column: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub esg_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_file: Option<PathBuf>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        let columns = ColumnNames::default();

        Self {
            esg_identifier_column: columns.identifier,
            esg_score_column: columns.esg_score,
            price_date_column: columns.date,
            esg_file: None,
            price_file: None,
            start_date: NaiveDate::from_ymd_opt(2023, 1, 3).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 30).unwrap_or_default(),
        }
    }
}

impl Config {
    pub fn load() -> EsResult<Self> {
        confy::load(APP_NAME, None).map_err(Into::into)
    }

    pub fn store(&self) -> EsResult<()> {
        confy::store(APP_NAME, None, self).map_err(Into::into)
    }

    pub fn columns(&self) -> ColumnNames {
        ColumnNames {
            identifier: self.esg_identifier_column.clone(),
            esg_score: self.esg_score_column.clone(),
            date: self.price_date_column.clone(),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let path_str = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default()
        };

        vec![
            ("esg_identifier_column", self.esg_identifier_column.clone()),
            ("esg_score_column", self.esg_score_column.clone()),
            ("price_date_column", self.price_date_column.clone()),
            ("esg_file", path_str(&self.esg_file)),
            ("price_file", path_str(&self.price_file)),
            ("start_date", date_to_str(&self.start_date)),
            ("end_date", date_to_str(&self.end_date)),
        ]
    }

    /// Sets one entry by key; an empty value clears an optional path.
    pub fn set(&mut self, key: &str, value: &str) -> EsResult<()> {
        let value = value.trim();
        let path = || {
            if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            }
        };

        match key.to_lowercase().as_str() {
            "esg_identifier_column" => self.esg_identifier_column = non_empty(key, value)?,
            "esg_score_column" => self.esg_score_column = non_empty(key, value)?,
            "price_date_column" => self.price_date_column = non_empty(key, value)?,
            "esg_file" => self.esg_file = path(),
            "price_file" => self.price_file = path(),
            "start_date" => self.start_date = date_from_str(value)?,
            "end_date" => self.end_date = date_from_str(value)?,
            _ => {
                return Err(EsError::Invalid {
                    code: "UNKNOWN_CONFIG_KEY",
                    message: format!("Unknown configuration key '{key}'"),
                });
            }
        }

        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> EsResult<String> {
    if value.is_empty() {
        Err(EsError::Invalid {
            code: "EMPTY_CONFIG_VALUE",
            message: format!("Configuration '{key}' cannot be empty"),
        })
    } else {
        Ok(value.to_string())
    }
}
