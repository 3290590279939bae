use std::{collections::HashMap, io, path::Path};

use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    data::{ColumnNames, column_index, csv_reader_builder, ensure_file},
    error::{EsError, EsResult},
};

/// One row of the ESG table, fields kept as raw text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EsgRecord {
    pub identifier: String,
    pub total_esg_score: String,
    pub attributes: Vec<(String, String)>,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct EsgTable {
    records: Vec<EsgRecord>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

pub fn load_esg(path: &Path, columns: &ColumnNames) -> EsResult<EsgTable> {
    ensure_file(path)?;

    let file = std::fs::File::open(path)?;
    let table = EsgTable::from_reader(file, columns)?;
    info!(
        "Loaded {} ESG records from '{}'",
        table.len(),
        path.to_string_lossy()
    );

    Ok(table)
}

impl EsgTable {
    pub fn from_reader<R: io::Read>(reader: R, columns: &ColumnNames) -> EsResult<Self> {
        let mut rdr = csv_reader_builder().from_reader(reader);

        let headers = rdr.headers()?.clone();
        let identifier_index = column_index(&headers, &columns.identifier)?;
        let score_index = column_index(&headers, &columns.esg_score)?;

        let mut table = Self::default();
        for (row, result) in rdr.records().enumerate() {
            let record = result?;

            let identifier = record.get(identifier_index).unwrap_or_default().to_string();
            if identifier.is_empty() {
                warn!("ESG row {} has no identifier, skipped", row + 1);
                continue;
            }

            let attributes = headers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != identifier_index && *i != score_index)
                .map(|(i, name)| {
                    (
                        name.to_string(),
                        record.get(i).unwrap_or_default().to_string(),
                    )
                })
                .collect();

            table.push(EsgRecord {
                identifier,
                total_esg_score: record.get(score_index).unwrap_or_default().to_string(),
                attributes,
            })?;
        }

        debug!("ESG columns: {headers:?}");

        Ok(table)
    }

    pub fn get(&self, identifier: &str) -> Option<&EsgRecord> {
        self.index.get(identifier).map(|i| &self.records[*i])
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    fn push(&mut self, record: EsgRecord) -> EsResult<()> {
        if self.index.contains_key(&record.identifier) {
            return Err(EsError::DataFormat {
                code: "DUPLICATE_IDENTIFIER",
                message: format!("Identifier '{}' appears more than once", record.identifier),
            });
        }

        self.index.insert(record.identifier.clone(), self.records.len());
        self.records.push(record);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESG_CSV: &str = "\
Symbol,Name,Total ESG Risk score,Environment Risk Score
AAPL,Apple Inc.,17.2,0.5
MSFT,Microsoft Corp,N/A,1.7
,Nameless,12.0,1.0
GOOG,Alphabet Inc.,24.1,
";

    #[test]
    fn test_from_reader() {
        let table = EsgTable::from_reader(ESG_CSV.as_bytes(), &ColumnNames::default()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("AAPL").unwrap().total_esg_score, "17.2");
        assert_eq!(table.get("MSFT").unwrap().total_esg_score, "N/A");
        assert_eq!(
            table.get("GOOG").unwrap().attributes,
            vec![
                ("Name".to_string(), "Alphabet Inc.".to_string()),
                ("Environment Risk Score".to_string(), "".to_string()),
            ]
        );
        assert!(table.get("TSLA").is_none());
    }

    #[test]
    fn test_from_reader_duplicate_identifier() {
        let csv = "Symbol,Total ESG Risk score\nAAPL,17.2\nAAPL,18.0\n";

        assert!(matches!(
            EsgTable::from_reader(csv.as_bytes(), &ColumnNames::default()),
            Err(EsError::DataFormat {
                code: "DUPLICATE_IDENTIFIER",
                ..
            })
        ));
    }

    #[test]
    fn test_from_reader_missing_column() {
        let csv = "Ticker,Total ESG Risk score\nAAPL,17.2\n";

        assert!(matches!(
            EsgTable::from_reader(csv.as_bytes(), &ColumnNames::default()),
            Err(EsError::DataFormat {
                code: "MISSING_COLUMN",
                ..
            })
        ));
    }
}
