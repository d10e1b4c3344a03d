use PlasmaGM::cli::cli_main::run_simulation_cli;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger init");

    let arguments: Vec<String> = std::env::args().collect();
    if let Err(e) = run_simulation_cli(arguments) {
        log::error!("simulation failed: {}", e);
        std::process::exit(1);
    }
}
