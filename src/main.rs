use ascii_converter::cli::{self, Args, Command};
use clap::Parser;

/// Set up the logger. `--verbose` forces debug output, otherwise `RUST_LOG`
/// applies with a default of `warn`.
fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command.clone() {
        Some(Command::Ramp) => cli::print_ramp(),
        Some(Command::Config { action }) => {
            if let Err(e) = cli::handle_config_action(action) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => match cli::run_conversion(&args) {
            Ok(()) => println!("Image converted!"),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(e.exit_code());
            }
        },
    }
}
