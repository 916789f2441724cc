//! Hexboard -- prints the topology of a hex-tile settlement board.
//!
//! Usage:
//!   hexboard [OPTIONS]
//!
//! Options:
//!   --players N     Number of players, 3-6 (default: 4)
//!   --config FILE   Read the board configuration from a JSON file
//!   --json          Print the assembled board as JSON instead of rows
//!   --debug         Enable debug logging (otherwise RUST_LOG applies)

use std::env;
use std::path::PathBuf;
use std::process;

use log::LevelFilter;

use hexboard::board::{assemble, render};
use hexboard::config::BoardConfig;

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut players: Option<u8> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut json = false;
    let mut debug = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--players" => {
                i += 1;
                players = match args.get(i).map(|v| v.parse()) {
                    Some(Ok(n)) => Some(n),
                    _ => fail("invalid --players value"),
                };
            }
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(PathBuf::from(path)),
                    None => fail("missing --config value"),
                }
            }
            "--json" => {
                json = true;
            }
            "--debug" => {
                debug = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => fail(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    let mut logger = env_logger::Builder::from_default_env();
    if debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let mut config = match config_path {
        Some(path) => BoardConfig::load(&path).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        }),
        None => BoardConfig::default(),
    };
    if let Some(n) = players {
        config.player_count = n;
    }

    let board = assemble(&config).unwrap_or_else(|e| {
        eprintln!("{}", e);
        process::exit(1);
    });

    if json {
        match serde_json::to_string_pretty(&board) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("failed to encode board: {}", e);
                process::exit(1);
            }
        }
    } else {
        print!("{}", render::render_board(&board));
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(2);
}

fn print_usage() {
    eprintln!("Usage: hexboard [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --players N      Number of players, 3-6 (default: 4)");
    eprintln!("  --config FILE    Read the board configuration from a JSON file");
    eprintln!("  --json           Print the assembled board as JSON");
    eprintln!("  --debug          Enable debug logging");
    eprintln!("  --help           Show this help");
}
