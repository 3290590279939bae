pub mod correlation;
pub mod histogram;
pub mod merge;
pub mod returns;
pub mod summary;
pub mod trend;

pub use correlation::{
    CorrelationResult, SIGNIFICANCE_LEVEL, Verdict, correlate, is_significant, pearson,
};
pub use histogram::{HistogramBin, histogram};
pub use merge::{MergedColumn, MergedRecord, merge};
pub use returns::{ReturnRecord, calc_returns};
pub use summary::{SummaryStats, summarize};
pub use trend::{TrendLine, fit_trend_line};
