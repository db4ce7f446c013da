use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

// Import from your library
use assetkit::utils::logger::Logger;
use assetkit::commands::{CommandFactory, AssetkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("AssetKit")
        .version("0.1")
        .about("Analyze and extract compiled asset catalogs")
        .arg(
            Arg::new("input")
                .help("Input container (compiled catalog or bundle directory)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose console output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("extract")
                .short('e')
                .long("extract")
                .help("Extract assets instead of analyzing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output directory for extracted assets")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("thumbnail-size")
                .long("thumbnail-size")
                .help("Thumbnail bounding box as WxH (e.g. 256x256)")
                .value_name("SIZE")
                .required(false),
        )
        .arg(
            Arg::new("constrained")
                .long("constrained")
                .help("Run resource-constrained (no thumbnails, no encoded bytes)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-items")
                .long("max-items")
                .help("Item cap for resource-constrained runs")
                .value_name("COUNT")
                .required(false),
        )
        .arg(
            Arg::new("include-packed")
                .long("include-packed")
                .help("Keep internally-packed placeholder assets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .help("Force the catalog mode (catalog or store)")
                .value_name("MODE")
                .required(false),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .help("TOML extraction profile file")
                .value_name("FILE")
                .required(false),
        )
        .get_matches();

    let log_file = "assetkit.log";
    let logger = match Logger::new(log_file) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if matches.get_flag("verbose") {
        // Console-only logging for interactive runs
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else if let Err(e) = Logger::init_global_logger("assetkit-global.log") {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = AssetkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
