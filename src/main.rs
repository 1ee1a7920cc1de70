//! Binary entry point: parse arguments and dispatch.
//!
//! Help and version exit early. Everything else is handed to
//! [`GarbageClock`], which owns the application lifecycle.

use garbage_clock::GarbageClock;
use garbage_clock::args::{self, CliAction, ParsedArgs};
use garbage_clock::common::constants::EXIT_FAILURE;
use garbage_clock::log_error_exit;

fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            demo,
        } => {
            let runner = GarbageClock::new(debug_enabled).with_config_dir(config_dir);
            if demo {
                runner.demo().run()
            } else {
                runner.run()
            }
        }
    };

    if let Err(e) = result {
        log_error_exit!("{e:#}");
        std::process::exit(EXIT_FAILURE);
    }
}
