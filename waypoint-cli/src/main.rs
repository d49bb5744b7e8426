//! Entry point for the `waypoint` binary.
#![forbid(unsafe_code)]

use waypoint_cli::CliError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match waypoint_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => report_and_exit(&err),
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports fatal errors on stderr"
)]
fn report_and_exit(err: &CliError) -> ! {
    eprintln!("waypoint: {err}");
    std::process::exit(1);
}
