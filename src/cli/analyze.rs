use std::{path::PathBuf, process::ExitCode};

use colored::Colorize;
use esgret::{api, gui, utils::datetime::date_to_str};
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Rows},
};

use crate::cli::{InputArgs, fmt_opt, summary_table};

#[derive(clap::Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    input: InputArgs,

    #[arg(
        short = 'o',
        long = "output",
        help = "Write the report as JSON, e.g. -o report.json"
    )]
    output_file: Option<PathBuf>,

    #[arg(
        short = 'g',
        help = "Open GUI window to display the return histogram and the ESG scatter chart"
    )]
    gui: bool,
}

impl AnalyzeCommand {
    pub fn exec(&self) -> ExitCode {
        let options = match self.input.resolve() {
            Ok(options) => options,
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                return ExitCode::FAILURE;
            }
        };

        println!(
            "[ESG] {} \t [Prices] {} \t [Window] {} ~ {}",
            options.esg_file.to_string_lossy(),
            options.price_file.to_string_lossy(),
            date_to_str(&options.start_date),
            date_to_str(&options.end_date)
        );

        match api::analyze(&options) {
            Ok((report, records)) => {
                println!(
                    "[Entities] {} priced, {} rated, {} merged",
                    report.price_entities, report.esg_records, report.merged_records
                );

                println!("{}", summary_table(&[&report.return_stats, &report.esg_stats]));

                let table_data: Vec<Vec<String>> = vec![
                    vec![
                        "Pairs".to_string(),
                        "Pearson r".to_string(),
                        "p-value".to_string(),
                        "Alpha".to_string(),
                        "Trend Slope".to_string(),
                        "Trend R²".to_string(),
                    ],
                    vec![
                        format!("{}", report.correlation.n),
                        format!("{:.4}", report.correlation.r),
                        format!("{:.4}", report.correlation.p_value),
                        format!("{}", report.correlation.significance_level),
                        fmt_opt(report.trend_line.as_ref().map(|l| l.slope), 6),
                        fmt_opt(report.trend_line.as_ref().map(|l| l.r2), 4),
                    ],
                ];
                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
                table.modify(Columns::new(0..), Alignment::right());
                println!("{table}");

                if report.correlation.reject_null {
                    println!("[Verdict] {}", report.verdict.green());
                } else {
                    println!("[Verdict] {}", report.verdict.yellow());
                }

                if let Some(output_file) = &self.output_file {
                    if let Err(err) = api::write_report(&report, output_file) {
                        println!("[!] {}", err.to_string().red());
                        return ExitCode::FAILURE;
                    }
                    println!("[Report] {}", output_file.to_string_lossy().bright_black());
                }

                if self.gui {
                    if let Err(err) = gui::show_charts(&report, &records) {
                        println!("[!] {}", err.to_string().red());
                        return ExitCode::FAILURE;
                    }
                }

                ExitCode::SUCCESS
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
                ExitCode::FAILURE
            }
        }
    }
}
