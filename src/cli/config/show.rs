use std::process::ExitCode;

use colored::Colorize;
use esgret::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigShowCommand;

impl ConfigShowCommand {
    pub fn exec(&self) -> ExitCode {
        match api::get_config() {
            Ok(config) => {
                let table_data: Vec<Vec<String>> = config
                    .entries()
                    .into_iter()
                    .map(|(key, value)| vec![key.to_string(), value])
                    .collect();

                let mut table = tabled::builder::Builder::from_iter(&table_data).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");

                ExitCode::SUCCESS
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());

                ExitCode::FAILURE
            }
        }
    }
}
