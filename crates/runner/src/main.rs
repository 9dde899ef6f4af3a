use tiller_runner::{MarketTape, RunnerConfig, TradingSession};

fn print_help() {
    eprintln!(
        r#"Tiller - exposure-managed band strategy on a daily price tape

USAGE:
    tiller --tape <PATH> [OPTIONS]

OPTIONS:
    --tape <PATH>       Market tape JSON file (required)
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run with defaults
    tiller --tape tape.json

    # Run with config file
    tiller --config config.json --tape tape.json
"#
    );
}

fn path_arg(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Error: {} requires a path argument", flag);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut tape_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                config_path = Some(path_arg(&args, i, "--config"));
            }
            "--tape" | "-t" => {
                i += 1;
                tape_path = Some(path_arg(&args, i, "--tape"));
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(tape_path) = tape_path else {
        eprintln!("Error: --tape is required");
        print_help();
        std::process::exit(1);
    };

    let config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            RunnerConfig::default()
        }
    };
    log::info!("Session: {}", config.name);
    log::info!("Initial cash: {}", config.initial_cash);
    log::info!(
        "Exposure targets: leverage={}, long={}, short={}",
        config.exposure.target_leverage,
        config.exposure.target_long_exposure_fraction,
        config.exposure.target_short_exposure_fraction
    );

    let tape = MarketTape::from_file(&tape_path)?;
    let mut session = TradingSession::new(&config)?;
    let report = session.run(&tape)?;

    log::info!("Days: {}", report.days);
    log::info!("Orders submitted: {}", report.orders_submitted);
    log::info!("Fills: {}", report.fills);
    log::info!("Final cash: {}", report.final_cash);
    log::info!("Final portfolio value: {}", report.final_portfolio_value);
    for (instrument_id, position) in &report.positions {
        log::info!(
            "Position {}: qty={}, basis={}, last={}",
            instrument_id,
            position.quantity,
            position.cost_basis,
            position.last_price
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
