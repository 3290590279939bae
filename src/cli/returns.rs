use std::process::ExitCode;

use colored::Colorize;
use esgret::api;
use tabled::settings::{
    Alignment, Color,
    object::{Columns, Object, Rows},
};

use crate::cli::{InputArgs, fmt_opt, fmt_pct};

#[derive(clap::Args)]
pub struct ReturnsCommand {
    #[command(flatten)]
    input: InputArgs,

    #[arg(short = 'n', long = "limit", help = "Show at most this many rows")]
    limit: Option<usize>,
}

impl ReturnsCommand {
    pub fn exec(&self) -> ExitCode {
        match self.input.resolve().and_then(|options| api::merged_records(&options)) {
            Ok(records) => {
                let mut table_data: Vec<Vec<String>> = vec![vec![
                    "".to_string(),
                    "Start Price".to_string(),
                    "End Price".to_string(),
                    "Return".to_string(),
                    "Difference".to_string(),
                    "ESG Score".to_string(),
                ]];
                for record in records.iter().take(self.limit.unwrap_or(usize::MAX)) {
                    table_data.push(vec![
                        record.identifier.to_string(),
                        fmt_opt(record.start_price, 2),
                        fmt_opt(record.end_price, 2),
                        fmt_pct(record.annual_return),
                        fmt_opt(record.price_difference, 2),
                        fmt_opt(record.total_esg_score, 1),
                    ]);
                }

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Rows::first(), Color::FG_BRIGHT_BLACK);
                table.modify(Columns::first().not(Rows::first()), Color::FG_CYAN);
                table.modify(Columns::new(1..), Alignment::right());
                println!("{table}");
                println!("[Rows] {}", records.len());

                ExitCode::SUCCESS
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());

                ExitCode::FAILURE
            }
        }
    }
}
