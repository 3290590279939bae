use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    data::PriceSeries,
    error::{EsError, EsResult},
    utils::stats,
};

/// Two-point return of one entity over the observation window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReturnRecord {
    pub identifier: String,
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub annual_return: Option<f64>,
}

/// Computes `end / start - 1` for every entity of the price table.
///
/// Both dates must be present in the table: there is no fallback to a
/// neighbouring trading day. A blank cell, or a start price that is not
/// strictly positive, leaves the return missing.
pub fn calc_returns(
    prices: &PriceSeries,
    start_date: &NaiveDate,
    end_date: &NaiveDate,
) -> EsResult<Vec<ReturnRecord>> {
    for date in [start_date, end_date] {
        if !prices.has_date(date) {
            return Err(EsError::MissingDate {
                date: *date,
                column: prices.date_column().to_string(),
            });
        }
    }

    let mut records: Vec<ReturnRecord> = Vec::with_capacity(prices.entities().len());
    for entity in prices.entities() {
        let start_price = prices.price(entity, start_date);
        let end_price = prices.price(entity, end_date);

        let annual_return = match (start_price, end_price) {
            (Some(start), Some(end)) => {
                let r = stats::pct_change(start, end);
                if r.is_none() {
                    warn!("[{entity}] Start price {start} is not positive, return is missing");
                }
                r
            }
            _ => {
                debug!("[{entity}] Price missing at start or end date");
                None
            }
        };

        records.push(ReturnRecord {
            identifier: entity.to_string(),
            start_price,
            end_price,
            annual_return,
        });
    }

    Ok(records)
}
