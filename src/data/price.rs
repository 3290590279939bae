use std::{
    collections::{HashMap, HashSet},
    io,
    path::Path,
};

use chrono::NaiveDate;
use log::{info, warn};

use crate::{
    data::{ColumnNames, column_index, csv_reader_builder, ensure_file},
    error::{EsError, EsResult},
    utils::{datetime, text},
};

/// Wide price table: one date column, one price column per entity.
#[derive(Clone, Debug, Default)]
pub struct PriceSeries {
    date_column: String,
    dates: Vec<NaiveDate>,
    date_rows: HashMap<NaiveDate, usize>,
    entities: Vec<String>,
    prices: HashMap<String, Vec<Option<f64>>>,
}

pub fn load_prices(path: &Path, columns: &ColumnNames) -> EsResult<PriceSeries> {
    ensure_file(path)?;

    let file = std::fs::File::open(path)?;
    let series = PriceSeries::from_reader(file, columns)?;
    info!(
        "Loaded {} dates x {} entities from '{}'",
        series.dates.len(),
        series.entities.len(),
        path.to_string_lossy()
    );

    Ok(series)
}

impl PriceSeries {
    pub fn from_reader<R: io::Read>(reader: R, columns: &ColumnNames) -> EsResult<Self> {
        let mut rdr = csv_reader_builder().from_reader(reader);

        let headers = rdr.headers()?.clone();
        let date_index = column_index(&headers, &columns.date)?;

        let mut entities: Vec<(usize, String)> = vec![];
        let mut seen: HashSet<&str> = HashSet::new();
        for (i, name) in headers.iter().enumerate() {
            if i == date_index || name.is_empty() {
                continue;
            }
            if !seen.insert(name) {
                return Err(EsError::DataFormat {
                    code: "DUPLICATE_IDENTIFIER",
                    message: format!("Price column '{name}' appears more than once"),
                });
            }
            entities.push((i, name.to_string()));
        }

        let mut series = Self {
            date_column: headers
                .get(date_index)
                .unwrap_or(columns.date.as_str())
                .to_string(),
            entities: entities.iter().map(|(_, name)| name.clone()).collect(),
            ..Default::default()
        };

        let mut negatives = 0usize;
        for result in rdr.records() {
            let record = result?;

            let date = datetime::date_from_str(record.get(date_index).unwrap_or_default())?;
            if series.date_rows.contains_key(&date) {
                return Err(EsError::DataFormat {
                    code: "DUPLICATE_DATE",
                    message: format!("Date {date} appears more than once"),
                });
            }
            series.date_rows.insert(date, series.dates.len());
            series.dates.push(date);

            for (i, name) in &entities {
                let price = match record.get(*i).and_then(text::parse_grouped_number) {
                    Some(v) if v < 0.0 => {
                        negatives += 1;
                        None
                    }
                    price => price,
                };
                series.prices.entry(name.clone()).or_default().push(price);
            }
        }

        if negatives > 0 {
            warn!("{negatives} negative prices treated as missing");
        }

        Ok(series)
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn has_date(&self, date: &NaiveDate) -> bool {
        self.date_rows.contains_key(date)
    }

    /// Price at exactly `date`, `None` when the date or the cell is absent.
    pub fn price(&self, entity: &str, date: &NaiveDate) -> Option<f64> {
        let row = self.date_rows.get(date)?;

        self.prices
            .get(entity)
            .and_then(|prices| prices.get(*row).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICE_CSV: &str = "\
Date,AAPL,MSFT,GOOG,BRK
2023-01-03,150,800,,\"468,711.5\"
2023-01-04,151.5,805,88.2,\"46,87\"
2023-01-05,-1,,89.0,
";

    fn date(s: &str) -> NaiveDate {
        datetime::date_from_str(s).unwrap()
    }

    #[test]
    fn test_from_reader() {
        let series =
            PriceSeries::from_reader(PRICE_CSV.as_bytes(), &ColumnNames::default()).unwrap();

        assert_eq!(series.date_column(), "Date");
        assert_eq!(series.entities(), ["AAPL", "MSFT", "GOOG", "BRK"]);
        assert!(series.has_date(&date("2023-01-05")));
        assert!(!series.has_date(&date("2023-01-06")));
        assert_eq!(series.price("AAPL", &date("2023-01-03")), Some(150.0));
        assert_eq!(series.price("MSFT", &date("2023-01-04")), Some(805.0));
        assert_eq!(series.price("GOOG", &date("2023-01-03")), None);
        assert_eq!(series.price("AAPL", &date("2023-01-05")), None);
        assert_eq!(series.price("AAPL", &date("2023-01-06")), None);
        assert_eq!(series.price("TSLA", &date("2023-01-03")), None);
    }

    #[test]
    fn test_from_reader_grouped_prices() {
        let series =
            PriceSeries::from_reader(PRICE_CSV.as_bytes(), &ColumnNames::default()).unwrap();

        assert_eq!(series.price("BRK", &date("2023-01-03")), Some(468711.5));
        assert_eq!(series.price("BRK", &date("2023-01-04")), None);
        assert_eq!(series.price("BRK", &date("2023-01-05")), None);
    }

    #[test]
    fn test_from_reader_invalid_date() {
        let csv = "Date,AAPL\n2023-01-03,150\nyesterday,151\n";

        assert!(matches!(
            PriceSeries::from_reader(csv.as_bytes(), &ColumnNames::default()),
            Err(EsError::DataFormat {
                code: "INVALID_DATE",
                ..
            })
        ));
    }

    #[test]
    fn test_from_reader_duplicate_date() {
        let csv = "Date,AAPL\n2023-01-03,150\n2023-01-03,151\n";

        assert!(matches!(
            PriceSeries::from_reader(csv.as_bytes(), &ColumnNames::default()),
            Err(EsError::DataFormat {
                code: "DUPLICATE_DATE",
                ..
            })
        ));
    }
}
