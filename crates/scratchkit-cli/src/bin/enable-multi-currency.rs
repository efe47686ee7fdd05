use std::process::ExitCode;

fn main() -> ExitCode {
    scratchkit_cli::currency_main(std::env::args_os())
}
