use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;
use esgret::{
    analysis::SummaryStats,
    api::{self, AnalysisOptions, OptionOverrides},
    error::EsResult,
    utils,
};
use tabled::{
    Table,
    settings::{
        Alignment, Color,
        object::{Columns, Object, Rows},
    },
};

mod analyze;
mod config;
mod describe;
mod returns;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Test the correlation between ESG scores and returns")]
    #[clap(visible_aliases = &["run"])]
    Analyze(Box<analyze::AnalyzeCommand>),

    #[command(about = "Show or change configurations")]
    #[command(subcommand)]
    Config(config::ConfigCommand),

    #[command(about = "Describe one column of the merged dataset")]
    Describe(Box<describe::DescribeCommand>),

    #[command(about = "List merged returns and ESG scores")]
    #[clap(visible_aliases = &["ls"])]
    Returns(Box<returns::ReturnsCommand>),
}

#[derive(clap::Args)]
pub struct InputArgs {
    #[arg(
        short = 'e',
        long = "esg",
        help = "ESG score table, the default value comes from 'esg_file', e.g. -e esg.csv"
    )]
    esg_file: Option<PathBuf>,

    #[arg(
        short = 'p',
        long = "prices",
        help = "Price table, the default value comes from 'price_file', e.g. -p prices.csv"
    )]
    price_file: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "start",
        value_parser = utils::datetime::date_from_str,
        help = "Start date of the return window, e.g. -s 2023-01-03"
    )]
    start_date: Option<NaiveDate>,

    #[arg(
        short = 't',
        long = "end",
        value_parser = utils::datetime::date_from_str,
        help = "End date of the return window, e.g. -t 2024-08-30"
    )]
    end_date: Option<NaiveDate>,
}

impl InputArgs {
    pub fn resolve(&self) -> EsResult<AnalysisOptions> {
        let config = api::get_config()?;

        AnalysisOptions::resolve(
            &config,
            &OptionOverrides {
                esg_file: self.esg_file.clone(),
                price_file: self.price_file.clone(),
                start_date: self.start_date,
                end_date: self.end_date,
            },
        )
    }
}

pub fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or("-".to_string())
}

pub fn fmt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v * 100.0))
        .unwrap_or("-".to_string())
}

pub fn summary_table(stats: &[&SummaryStats]) -> Table {
    let mut table_data: Vec<Vec<String>> = vec![
        [vec!["".to_string()], stats.iter().map(|s| s.label.clone()).collect()].concat(),
    ];

    let rows: [(&str, fn(&SummaryStats) -> String); 10] = [
        ("Count", |s| format!("{} / {}", s.count, s.total)),
        ("Min", |s| format!("{:.4}", s.min)),
        ("Max", |s| format!("{:.4}", s.max)),
        ("Range", |s| format!("{:.4}", s.range)),
        ("Mean", |s| format!("{:.4}", s.mean)),
        ("Median", |s| format!("{:.4}", s.median)),
        ("Variance", |s| fmt_opt(s.variance, 4)),
        ("Std Dev", |s| fmt_opt(s.std_dev, 4)),
        ("Skewness", |s| fmt_opt(s.skewness, 4)),
        ("Kurtosis", |s| fmt_opt(s.kurtosis, 4)),
    ];
    for (name, value) in rows {
        table_data.push(
            [
                vec![name.to_string()],
                stats.iter().map(|s| value(s)).collect(),
            ]
            .concat(),
        );
    }

    let mut table = tabled::builder::Builder::from_iter(&table_data).build();
    table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
    table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
    table.modify(Columns::new(1..), Alignment::right());

    table
}
