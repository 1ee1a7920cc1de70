//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags, a custom configuration directory and demo mode,
//! and reports unknown options instead of ignoring them.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the clock with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// Force demo mode regardless of the configuration file
        demo: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut demo = false;
        let mut unknown_arg_found = false;
        let mut config_dir: Option<String> = None;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = args_vec[i].as_str();
            match arg_str {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--demo" => demo = true,
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("Missing directory for --config. Usage: --config <dir>");
                        unknown_arg_found = true;
                    }
                },
                _ => {
                    if arg_str.starts_with('-') {
                        log_warning!("Unknown option: {arg_str}");
                    } else {
                        log_warning!("Unexpected argument: {arg_str}");
                    }
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else {
            CliAction::Run {
                debug_enabled,
                config_dir,
                demo,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    log_end!();
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("garbage-clock [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("    --demo             Walk through the week without network access");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(debug_enabled: bool, config_dir: Option<&str>, demo: bool) -> CliAction {
        CliAction::Run {
            debug_enabled,
            config_dir: config_dir.map(str::to_string),
            demo,
        }
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = ParsedArgs::parse(["garbage-clock"]);
        assert_eq!(parsed.action, run(false, None, false));
    }

    #[test]
    fn test_parse_debug_flags() {
        for flag in ["--debug", "-d"] {
            let parsed = ParsedArgs::parse(["garbage-clock", flag]);
            assert_eq!(parsed.action, run(true, None, false));
        }
    }

    #[test]
    fn test_parse_help_flags() {
        for flag in ["--help", "-h"] {
            let parsed = ParsedArgs::parse(["garbage-clock", flag]);
            assert_eq!(parsed.action, CliAction::ShowHelp);
        }
    }

    #[test]
    fn test_parse_version_flags() {
        for flag in ["--version", "-V", "-v"] {
            let parsed = ParsedArgs::parse(["garbage-clock", flag]);
            assert_eq!(parsed.action, CliAction::ShowVersion);
        }
    }

    #[test]
    fn test_parse_config_dir() {
        let parsed = ParsedArgs::parse(["garbage-clock", "--config", "/tmp/clock", "-d"]);
        assert_eq!(parsed.action, run(true, Some("/tmp/clock"), false));

        let parsed = ParsedArgs::parse(["garbage-clock", "-c", "~/clock"]);
        assert_eq!(parsed.action, run(false, Some("~/clock"), false));
    }

    #[test]
    fn test_parse_config_missing_dir() {
        crate::common::logger::Log::set_enabled(false);
        let parsed = ParsedArgs::parse(["garbage-clock", "--config"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);

        let parsed = ParsedArgs::parse(["garbage-clock", "--config", "--debug"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_parse_demo() {
        let parsed = ParsedArgs::parse(["garbage-clock", "--demo", "--debug"]);
        assert_eq!(parsed.action, run(true, None, true));
    }

    #[test]
    fn test_help_with_debug() {
        let parsed = ParsedArgs::parse(["garbage-clock", "--debug", "--help"]);
        assert_eq!(parsed.action, CliAction::ShowHelp);
    }

    #[test]
    fn test_parse_unknown_arguments() {
        crate::common::logger::Log::set_enabled(false);
        let parsed = ParsedArgs::parse(["garbage-clock", "--unknown"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);

        let parsed = ParsedArgs::parse(["garbage-clock", "--debug", "geo"]);
        assert_eq!(parsed.action, CliAction::ShowHelpDueToError);
    }

    #[test]
    fn test_version_takes_precedence() {
        let parsed = ParsedArgs::parse(["garbage-clock", "--version", "--help", "--bogus"]);
        assert_eq!(parsed.action, CliAction::ShowVersion);
    }
}
