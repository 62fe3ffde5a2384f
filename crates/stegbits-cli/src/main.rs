use std::process::ExitCode;

use clap::Parser;
use stegbits_core::OperationResult;

use crate::cli::{CliArgs, Commands};

mod cli;
mod commands;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    let options = args.codec_options();
    let result = match args.command {
        Commands::Hide(cmd) => cmd.run(args.depth, options),
        Commands::Unveil(cmd) => cmd.run(args.depth, options),
        Commands::Capacity(cmd) => cmd.run(args.depth, options),
    };

    report(result)
}

fn report(result: OperationResult) -> ExitCode {
    if result.status {
        println!("{}", result.message);
        ExitCode::SUCCESS
    } else {
        eprintln!("Error: {}", result.message);
        ExitCode::FAILURE
    }
}
