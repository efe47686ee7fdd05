use std::process::ExitCode;

fn main() -> ExitCode {
    scratchkit_cli::provision_main(std::env::args_os())
}
