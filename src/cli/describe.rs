use std::process::ExitCode;

use colored::Colorize;
use esgret::{analysis::MergedColumn, api};

use crate::cli::{InputArgs, summary_table};

#[derive(clap::Args)]
pub struct DescribeCommand {
    #[command(flatten)]
    input: InputArgs,

    #[arg(
        short = 'c',
        long = "column",
        default_value = "annual-return",
        help = "Column to describe: start-price, end-price, annual-return, price-difference or total-esg-score"
    )]
    column: MergedColumn,

    #[arg(short = 'l', long = "label", help = "Label of the statistics table")]
    label: Option<String>,
}

impl DescribeCommand {
    pub fn exec(&self) -> ExitCode {
        let label = self.label.clone().unwrap_or(self.column.to_string());

        match self
            .input
            .resolve()
            .and_then(|options| api::describe(&options, self.column, &label))
        {
            Ok(stats) => {
                println!("{}", summary_table(&[&stats]));

                ExitCode::SUCCESS
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());

                ExitCode::FAILURE
            }
        }
    }
}
