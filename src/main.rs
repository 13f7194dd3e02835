//! rawsh: interactive shell.
//!
//! Puts the controlling terminal in raw mode, reads lines with tab completion
//! of command names, and runs them as built-ins or external programs with
//! optional `>`/`>>`/`2>`/`2>>` redirection.

use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use rawsh::config::Config;

#[derive(FromArgs)]
/// Interactive shell with raw-mode line editing and command-name completion.
struct Args {
    #[argh(option)]
    /// configuration file to merge over the defaults (default: ~/.config/rawsh/config.toml).
    config: Option<PathBuf>,

    #[argh(switch)]
    /// print the merged configuration as TOML and exit.
    dump_config: bool,

    #[argh(switch, short = 'v')]
    /// log at debug level.
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();
    let config = Config::load(args.config.as_deref());

    if args.dump_config {
        return match config.to_toml() {
            Ok(text) => {
                print!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("rawsh: cannot render config: {e}");
                ExitCode::FAILURE
            }
        };
    }

    rawsh::logging::init(&config.logging, args.verbose);

    match rawsh::run(&config) {
        // Statuses wrap modulo 256, as a parent process sees them.
        Ok(status) => ExitCode::from(status as u8),
        Err(e) => {
            log::error!("{e}");
            eprintln!("rawsh: {e}");
            ExitCode::FAILURE
        }
    }
}
