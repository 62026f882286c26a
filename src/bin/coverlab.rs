use clap::Parser;
use colored::Colorize;
use coverlab_core::cli::{self, Cli};
use coverlab_core::exit::CoverlabExit;

fn main() -> CoverlabExit {
    let cli = Cli::parse();

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd, &cli.global)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(CoverlabExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            CoverlabExit::from_error(&e)
        }
    }
}
