use log::{debug, info, warn};
use serde::Serialize;

use crate::{
    analysis::returns::ReturnRecord,
    data::EsgTable,
    utils::text::{finite, parse_number},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum MergedColumn {
    StartPrice,
    EndPrice,
    AnnualReturn,
    PriceDifference,
    TotalEsgScore,
}

/// A return joined with its ESG score, numeric fields already coerced.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MergedRecord {
    pub identifier: String,
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub annual_return: Option<f64>,
    pub price_difference: Option<f64>,
    pub total_esg_score: Option<f64>,
}

impl MergedRecord {
    pub fn value(&self, column: MergedColumn) -> Option<f64> {
        match column {
            MergedColumn::StartPrice => self.start_price,
            MergedColumn::EndPrice => self.end_price,
            MergedColumn::AnnualReturn => self.annual_return,
            MergedColumn::PriceDifference => self.price_difference,
            MergedColumn::TotalEsgScore => self.total_esg_score,
        }
    }
}

pub fn column_values(records: &[MergedRecord], column: MergedColumn) -> Vec<Option<f64>> {
    records.iter().map(|r| r.value(column)).collect()
}

/// Inner join of returns and ESG rows on the identifier, in return order.
///
/// Entities missing on either side are dropped without error. Values that
/// do not coerce to a finite number become `None`.
pub fn merge(esg: &EsgTable, returns: &[ReturnRecord]) -> Vec<MergedRecord> {
    let mut records: Vec<MergedRecord> = Vec::with_capacity(returns.len());
    let mut dropped: Vec<&str> = vec![];

    if esg.is_empty() {
        warn!("ESG table has no records, every return will be dropped");
    }

    for ret in returns {
        let Some(esg_record) = esg.get(&ret.identifier) else {
            dropped.push(&ret.identifier);
            continue;
        };

        let price_difference = match (ret.start_price, ret.end_price) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        };

        records.push(MergedRecord {
            identifier: ret.identifier.clone(),
            start_price: ret.start_price,
            end_price: ret.end_price,
            annual_return: finite(ret.annual_return),
            price_difference: finite(price_difference),
            total_esg_score: parse_number(&esg_record.total_esg_score),
        });
    }

    if !dropped.is_empty() {
        debug!("Without ESG record: {dropped:?}");
    }

    let missing_scores = records
        .iter()
        .filter(|r| r.total_esg_score.is_none())
        .count();
    let missing_returns = records.iter().filter(|r| r.annual_return.is_none()).count();
    info!(
        "Merged {} of {} returns and {} ESG records ({} missing scores, {} missing returns)",
        records.len(),
        returns.len(),
        esg.len(),
        missing_scores,
        missing_returns
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ColumnNames;

    const ESG_CSV: &str = "\
Symbol,Total ESG Risk score
AAPL,17.2
MSFT,N/A
ONLY_ESG,30.0
";

    fn returns() -> Vec<ReturnRecord> {
        vec![
            ReturnRecord {
                identifier: "AAPL".to_string(),
                start_price: Some(150.0),
                end_price: Some(160.0),
                annual_return: Some(160.0 / 150.0 - 1.0),
            },
            ReturnRecord {
                identifier: "MSFT".to_string(),
                start_price: Some(800.0),
                end_price: Some(810.0),
                annual_return: Some(810.0 / 800.0 - 1.0),
            },
            ReturnRecord {
                identifier: "ONLY_PRICE".to_string(),
                start_price: Some(1.0),
                end_price: Some(2.0),
                annual_return: Some(1.0),
            },
        ]
    }

    #[test]
    fn test_merge() {
        let esg = EsgTable::from_reader(ESG_CSV.as_bytes(), &ColumnNames::default()).unwrap();
        let records = merge(&esg, &returns());

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.identifier != "ONLY_PRICE"));
        assert!(records.iter().all(|r| r.identifier != "ONLY_ESG"));

        assert_eq!(records[0].identifier, "AAPL");
        assert_eq!(records[0].price_difference, Some(10.0));
        assert_eq!(records[0].total_esg_score, Some(17.2));

        assert_eq!(records[1].identifier, "MSFT");
        assert_eq!(records[1].total_esg_score, None);
        assert_eq!(records[1].price_difference, Some(10.0));
    }

    #[test]
    fn test_merge_non_finite_return() {
        let esg = EsgTable::from_reader(ESG_CSV.as_bytes(), &ColumnNames::default()).unwrap();
        let returns = vec![ReturnRecord {
            identifier: "AAPL".to_string(),
            start_price: Some(0.0),
            end_price: None,
            annual_return: Some(f64::INFINITY),
        }];
        let records = merge(&esg, &returns);

        assert_eq!(records[0].annual_return, None);
        assert_eq!(records[0].price_difference, None);
    }

    #[test]
    fn test_merge_rejects_decimal_comma_score() {
        let esg_csv = "Symbol,Total ESG Risk score\nAAPL,\"17,2\"\nMSFT,\"1,2,3\"\n";
        let esg = EsgTable::from_reader(esg_csv.as_bytes(), &ColumnNames::default()).unwrap();
        let records = merge(&esg, &returns());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].total_esg_score, None);
        assert_eq!(records[1].total_esg_score, None);
        assert_eq!(records[0].annual_return, Some(160.0 / 150.0 - 1.0));
    }

    #[test]
    fn test_merged_column() {
        assert_eq!(
            "annual-return".parse::<MergedColumn>().unwrap(),
            MergedColumn::AnnualReturn
        );
        assert_eq!(
            "Total-ESG-Score".parse::<MergedColumn>().unwrap(),
            MergedColumn::TotalEsgScore
        );
        assert_eq!(MergedColumn::PriceDifference.to_string(), "price-difference");
        assert!("volume".parse::<MergedColumn>().is_err());
    }
}
