use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Serialize;

use crate::{
    analysis::{
        CorrelationResult, HistogramBin, MergedColumn, MergedRecord, ReturnRecord, SummaryStats,
        TrendLine, calc_returns, correlate, fit_trend_line, histogram, merge, summarize,
    },
    config::Config,
    data::{ColumnNames, load_esg, load_prices},
    error::*,
};

pub static RETURN_LABEL: &str = "Annual Return";
pub static ESG_LABEL: &str = "Total ESG Score";

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    pub esg_file: PathBuf,
    pub price_file: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub columns: ColumnNames,
}

/// Per-run values that override the stored configuration.
#[derive(Clone, Debug, Default)]
pub struct OptionOverrides {
    pub esg_file: Option<PathBuf>,
    pub price_file: Option<PathBuf>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub struct PipelineOutput {
    pub price_entities: usize,
    pub esg_records: usize,
    pub returns: Vec<ReturnRecord>,
    pub records: Vec<MergedRecord>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub esg_file: PathBuf,
    pub price_file: PathBuf,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price_entities: usize,
    pub esg_records: usize,
    pub merged_records: usize,
    pub return_stats: SummaryStats,
    pub esg_stats: SummaryStats,
    pub correlation: CorrelationResult,
    pub verdict: String,
    pub trend_line: Option<TrendLine>,
    pub histogram: Vec<HistogramBin>,
}

impl AnalysisOptions {
    pub fn resolve(config: &Config, overrides: &OptionOverrides) -> EsResult<Self> {
        let esg_file = overrides
            .esg_file
            .clone()
            .or_else(|| config.esg_file.clone())
            .ok_or_else(|| EsError::Invalid {
                code: "MISSING_INPUT",
                message: "No ESG file given, pass --esg or set 'esg_file'".to_string(),
            })?;
        let price_file = overrides
            .price_file
            .clone()
            .or_else(|| config.price_file.clone())
            .ok_or_else(|| EsError::Invalid {
                code: "MISSING_INPUT",
                message: "No price file given, pass --prices or set 'price_file'".to_string(),
            })?;

        Ok(Self {
            esg_file,
            price_file,
            start_date: overrides.start_date.unwrap_or(config.start_date),
            end_date: overrides.end_date.unwrap_or(config.end_date),
            columns: config.columns(),
        })
    }
}

/// Loader, return calculator and merger, each fed by the previous stage.
pub fn run_pipeline(options: &AnalysisOptions) -> EsResult<PipelineOutput> {
    debug!("{options:?}");

    let esg = load_esg(&options.esg_file, &options.columns).map_err(EsError::at(Stage::Loader))?;
    let prices =
        load_prices(&options.price_file, &options.columns).map_err(EsError::at(Stage::Loader))?;

    let returns = calc_returns(&prices, &options.start_date, &options.end_date)
        .map_err(EsError::at(Stage::ReturnCalculator))?;

    let records = merge(&esg, &returns);

    Ok(PipelineOutput {
        price_entities: prices.entities().len(),
        esg_records: esg.len(),
        returns,
        records,
    })
}

pub fn analyze(options: &AnalysisOptions) -> EsResult<(AnalysisReport, Vec<MergedRecord>)> {
    let output = run_pipeline(options)?;
    let report = build_report(options, &output).map_err(EsError::at(Stage::Analyzer))?;

    Ok((report, output.records))
}

pub fn describe(
    options: &AnalysisOptions,
    column: MergedColumn,
    label: &str,
) -> EsResult<SummaryStats> {
    let output = run_pipeline(options)?;

    summarize(&output.records, column, label).map_err(EsError::at(Stage::Analyzer))
}

pub fn merged_records(options: &AnalysisOptions) -> EsResult<Vec<MergedRecord>> {
    Ok(run_pipeline(options)?.records)
}

pub fn write_report(report: &AnalysisReport, path: &Path) -> EsResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;

    Ok(())
}

pub fn get_config() -> EsResult<Config> {
    Config::load()
}

pub fn set_config(key: &str, value: &str) -> EsResult<Config> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.store()?;

    Ok(config)
}

fn build_report(options: &AnalysisOptions, output: &PipelineOutput) -> EsResult<AnalysisReport> {
    let records = &output.records;

    let return_stats = summarize(records, MergedColumn::AnnualReturn, RETURN_LABEL)?;
    let esg_stats = summarize(records, MergedColumn::TotalEsgScore, ESG_LABEL)?;
    let correlation = correlate(
        records,
        MergedColumn::TotalEsgScore,
        MergedColumn::AnnualReturn,
    )?;

    let trend_line = match fit_trend_line(
        records,
        MergedColumn::TotalEsgScore,
        MergedColumn::AnnualReturn,
    ) {
        Ok(line) => Some(line),
        Err(err) => {
            warn!("Trend line omitted: {err}");
            None
        }
    };

    let returns: Vec<f64> = records.iter().filter_map(|r| r.annual_return).collect();

    Ok(AnalysisReport {
        esg_file: options.esg_file.clone(),
        price_file: options.price_file.clone(),
        start_date: options.start_date,
        end_date: options.end_date,
        price_entities: output.price_entities,
        esg_records: output.esg_records,
        merged_records: records.len(),
        return_stats,
        esg_stats,
        verdict: correlation.verdict().to_string(),
        correlation,
        trend_line,
        histogram: histogram(&returns, None),
    })
}
