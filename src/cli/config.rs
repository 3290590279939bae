use std::process::ExitCode;

use clap::Subcommand;

mod set;
mod show;

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Set configuration")]
    Set(Box<set::ConfigSetCommand>),

    #[command(about = "Show configurations")]
    Show(Box<show::ConfigShowCommand>),
}

impl ConfigCommand {
    pub fn exec(&self) -> ExitCode {
        match self {
            ConfigCommand::Set(cmd) => cmd.exec(),
            ConfigCommand::Show(cmd) => cmd.exec(),
        }
    }
}
