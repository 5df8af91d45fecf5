use clap::Parser;
use fae_rpc_app::{ClientArgs, init_tracing, run_client};
use std::process::ExitCode;

fn main() -> ExitCode {
    init_tracing("warn");

    let args = ClientArgs::parse();

    match run_client(&args) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
