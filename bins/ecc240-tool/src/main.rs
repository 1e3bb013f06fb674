use clap::{Parser, Subcommand};

use ecc240_codec::{CheckOutcome, EccProfile, get_params, self_test};
use ecc240_config::{HarnessConfig, toml_config};
use ecc240_core::bits::get_nth_bit;
use ecc240_core::{ProfileKind, debug};

mod demo;
mod tables;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ecc240 error-correcting CRC16 tool",
    long_about = "Computes and checks error-correcting CRC16 checksums and runs the exhaustive self-test and correction demo"
)]
struct Args {
    /// Log everything at trace level to stdout
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exhaustively verify both compiled-in profiles
    Selftest,

    /// Inject every correctable error pattern into synthetic frames and correct them
    Demo {
        #[arg(short = 'c', long = "config", help = "TOML harness config; defaults to a single counter frame, General profile")]
        config: Option<String>,
    },

    /// Compute the checksum of a frame
    Generate {
        #[arg(short = 'p', long = "profile", default_value = "general", help = "Profile: [ general | fixed240 ]")]
        profile: String,

        #[arg(help = "Frame data as hex")]
        frame: String,
    },

    /// Check a frame against a received checksum and correct it if possible
    Check {
        #[arg(short = 'p', long = "profile", default_value = "general", help = "Profile: [ general | fixed240 ]")]
        profile: String,

        #[arg(help = "Frame data as hex")]
        frame: String,

        #[arg(help = "Received checksum, decimal or 0x-prefixed hex")]
        checksum: String,
    },

    /// Print a profile's reduction tables
    Tables {
        #[arg(short = 'p', long = "profile", default_value = "general", help = "Profile: [ general | fixed240 ]")]
        profile: String,
    },
}

fn load_config_from_toml(cfg_path: &str) -> HarnessConfig {
    match toml_config::from_file(cfg_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration from {}: {}", cfg_path, e);
            std::process::exit(1);
        }
    }
}

fn parse_profile(name: &str) -> &'static EccProfile {
    match ProfileKind::from_name(name) {
        Some(kind) => get_params(kind),
        None => {
            eprintln!("Error: Unsupported profile '{}'. Use: general, fixed240", name);
            std::process::exit(1);
        }
    }
}

fn parse_frame(hex_str: &str) -> Vec<u8> {
    match hex::decode(hex_str.trim()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: Invalid hex frame '{}': {}", hex_str, e);
            std::process::exit(1);
        }
    }
}

fn parse_checksum(s: &str) -> u16 {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(h) => u16::from_str_radix(h, 16),
        None => s.parse::<u16>(),
    };
    match parsed {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: Invalid checksum '{}': {}", s, e);
            std::process::exit(1);
        }
    }
}

fn run_self_test() {
    match self_test() {
        Ok(()) => println!("self-test: pass"),
        Err(e) => {
            eprintln!("self-test: FAIL: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    eprintln!("[+] ecc240 error-correcting CRC16 tool");

    let args = Args::parse();

    // Demo may name a debug log file in its config, load it before logging is set up
    let demo_cfg = match &args.command {
        Command::Demo { config: Some(path) } => Some(load_config_from_toml(path)),
        Command::Demo { config: None } => Some(HarnessConfig::default()),
        _ => None,
    };

    let _log_guard = if args.verbose {
        debug::setup_logging_verbose();
        None
    } else {
        debug::setup_logging_default(demo_cfg.as_ref().and_then(|c| c.debug_log.clone()))
    };

    match args.command {
        Command::Selftest => run_self_test(),

        Command::Demo { .. } => {
            let cfg = demo_cfg.unwrap_or_default();
            if cfg.self_test_on_start {
                run_self_test();
            }
            let report = demo::run_demo(&cfg.harness);
            println!(
                "demo: {} frames, {} patterns injected, {} failures",
                report.frames, report.injected, report.failures
            );
            if report.failures != 0 {
                std::process::exit(1);
            }
        }

        Command::Generate { profile, frame } => {
            let params = parse_profile(&profile);
            let frame = parse_frame(&frame);
            match params.generate(&frame) {
                Ok(crc) => println!("{} ({:#06x})", crc, crc),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Command::Check { profile, frame, checksum } => {
            let params = parse_profile(&profile);
            let mut frame = parse_frame(&frame);
            let claimed = parse_checksum(&checksum);
            match params.check_and_correct(&mut frame, claimed) {
                Ok(CheckOutcome::NoChangeNeeded) => {
                    println!("ok: no change needed");
                    println!("{}", hex::encode(&frame));
                }
                Ok(CheckOutcome::Corrected(desc)) => {
                    if desc.offset >= 8 * frame.len() {
                        println!("corrected: checksum bit {}, data intact", desc.offset - 8 * frame.len());
                    } else {
                        let repaired: String = (desc.offset..desc.offset + desc.run_len)
                            .map(|bit| if get_nth_bit(&frame, bit, params.bit_order) == 1 { '1' } else { '0' })
                            .collect();
                        println!("corrected: {} bit(s) at offset {}, now {}", desc.run_len, desc.offset, repaired);
                    }
                    println!("{}", hex::encode(&frame));
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Command::Tables { profile } => tables::print_tables(parse_profile(&profile)),
    }
}
