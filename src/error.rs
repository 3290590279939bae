use std::path::PathBuf;

use chrono::NaiveDate;

pub type EsResult<T> = Result<T, EsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Stage {
    #[strum(to_string = "Loader")]
    Loader,
    #[strum(to_string = "Return Calculator")]
    ReturnCalculator,
    #[strum(to_string = "Analyzer")]
    Analyzer,
}

#[derive(Debug, thiserror::Error)]
pub enum EsError {
    #[error("[CSV Error] {0}")]
    CsvError(#[from] ::csv::Error),

    #[error("[Data Format Error] {message}")]
    DataFormat { code: &'static str, message: String },

    #[error("[File Not Found] {}", path.to_string_lossy())]
    FileNotFound { path: PathBuf },

    #[error("[GUI Error] {0}")]
    GuiError(String),

    #[error("[Insufficient Data] {message}")]
    InsufficientData { code: &'static str, message: String },

    #[error("[Invalid] {message}")]
    Invalid { code: &'static str, message: String },

    #[error("[IO Error] {0}")]
    IoError(#[from] std::io::Error),

    #[error("[Machine Learning Error] {0}")]
    MachineLearningError(String),

    #[error("[Missing Date] {date} is not present in column '{column}'")]
    MissingDate { date: NaiveDate, column: String },

    #[error("[Parse Config Error] {0}")]
    ParseConfigError(#[from] ::confy::ConfyError),

    #[error("[Parse DataTime Error] {0}")]
    ParseDataTimeError(#[from] chrono::ParseError),

    #[error("[Parse Enum Error] {0}")]
    ParseEnumError(#[from] ::strum::ParseError),

    #[error("[Serde JSON Error] {0}")]
    SerdeJsonError(#[from] ::serde_json::Error),

    #[error("[{stage}] {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<EsError>,
    },
}

impl EsError {
    pub fn at(stage: Stage) -> impl FnOnce(EsError) -> EsError {
        move |err| match err {
            EsError::Stage { .. } => err,
            _ => EsError::Stage {
                stage,
                source: Box::new(err),
            },
        }
    }

    /// The error without its stage attribution.
    pub fn root(&self) -> &EsError {
        match self {
            EsError::Stage { source, .. } => source.root(),
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_message() {
        let err = EsError::at(Stage::ReturnCalculator)(EsError::MissingDate {
            date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
            column: "Date".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "[Return Calculator] [Missing Date] 2023-01-02 is not present in column 'Date'"
        );
        assert!(matches!(err.root(), EsError::MissingDate { .. }));
    }

    #[test]
    fn test_stage_not_nested() {
        let err = EsError::at(Stage::Loader)(EsError::FileNotFound {
            path: PathBuf::from("esg.csv"),
        });
        let err = EsError::at(Stage::Analyzer)(err);

        assert!(matches!(
            err,
            EsError::Stage {
                stage: Stage::Loader,
                ..
            }
        ));
    }
}
