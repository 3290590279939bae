use std::process::ExitCode;

use colored::Colorize;
use esgret::api;
use tabled::settings::{Color, object::Columns};

#[derive(clap::Args)]
pub struct ConfigSetCommand {
    key: String,
    value: String,
}

impl ConfigSetCommand {
    pub fn exec(&self) -> ExitCode {
        match api::set_config(&self.key, &self.value) {
            Ok(_) => {
                let table_data: Vec<Vec<String>> =
                    vec![vec![self.key.to_lowercase(), self.value.clone()]];

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
