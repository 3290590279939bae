use chrono::{DateTime, NaiveDate};

use crate::error::{EsError, EsResult};

pub fn date_from_str(s: &str) -> EsResult<NaiveDate> {
    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y%m%d",
        "%Y/%m/%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f", // ISO 8601 Extended
    ];

    let s = s.trim();

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    // Price exports often carry a timezone suffix, e.g. "2023-01-03 00:00:00-05:00"
    if let Ok(datetime) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(datetime.date_naive());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime.date_naive());
    }

    Err(EsError::DataFormat {
        code: "INVALID_DATE",
        message: format!("Unable to parse date '{s}'"),
    })
}

pub fn date_to_str(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_from_str() {
        assert_eq!(
            date_to_str(&date_from_str("2023-01-03").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("20230103").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2023/01/03").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2023-01-03 00:00:00").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2023-01-03 00:00:00-05:00").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str("2023-01-03T00:00:00Z").unwrap()),
            "2023-01-03"
        );
        assert_eq!(
            date_to_str(&date_from_str(" 2024-08-30 ").unwrap()),
            "2024-08-30"
        );
        assert!(date_from_str("not-a-date").is_err());
        assert!(date_from_str("").is_err());
    }

    #[test]
    fn test_date_to_str() {
        assert_eq!(
            date_to_str(&NaiveDate::from_ymd_opt(2024, 8, 30).unwrap()),
            "2024-08-30"
        );
    }
}
