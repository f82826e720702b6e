//! Command-line argument parsing.
//!
//! Supports the `run` (default), `presets` and `help` subcommands plus the
//! global flags. Unknown arguments lead to the help screen and a failure exit.

/// Options shared by the commands that talk to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonOptions {
    pub debug_enabled: bool,
    pub config_dir: Option<String>,
    pub store_url: Option<String>,
}

/// What the process should do.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Open the interactive panel.
    Run {
        options: CommonOptions,
        log_file: Option<String>,
    },
    /// Print the built-in and custom presets and exit.
    ListPresets {
        options: CommonOptions,
        log_file: Option<String>,
    },
    ShowHelp,
    ShowVersion,
    ShowHelpDueToError,
}

pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse the process arguments (the first item is the program name).
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut options = CommonOptions::default();
        let mut log_file: Option<String> = None;
        let mut command: Option<String> = None;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;

        let mut iter = args_vec.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--config" | "-c" => match iter.next() {
                    Some(dir) => options.config_dir = Some(dir),
                    None => unknown_arg_found = true,
                },
                "--store" | "-s" => match iter.next() {
                    Some(url) => options.store_url = Some(url),
                    None => unknown_arg_found = true,
                },
                "--log" => match iter.next() {
                    Some(path) => log_file = Some(path),
                    None => unknown_arg_found = true,
                },
                flag if flag.starts_with('-') => {
                    log_warning!("Unknown argument: {}", flag);
                    unknown_arg_found = true;
                }
                _ if command.is_none() => command = Some(arg.clone()),
                extra => {
                    log_warning!("Unexpected argument: {}", extra);
                    unknown_arg_found = true;
                }
            }
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            match command.as_deref() {
                None | Some("run") => CliAction::Run { options, log_file },
                Some("presets") | Some("list") => CliAction::ListPresets { options, log_file },
                Some("help") => CliAction::ShowHelp,
                Some(other) => {
                    log_warning!("Unknown command: {}", other);
                    CliAction::ShowHelpDueToError
                }
            }
        };

        ParsedArgs { action }
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("micropanel [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-s, --store <url>      Override the preset store URL");
    log_indented!("    --log <file>       Also write the output to a file");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("run                    Open the interactive panel (default)");
    log_indented!("presets, list          Print the stored presets and exit");
    log_indented!("help                   Show this help");
    log_block_start!("Keys:");
    for line in crate::terminal::keymap::key_help() {
        log_indented!("{}", line);
    }
    log_end!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        crate::logger::Log::set_enabled(false);
        let mut full = vec!["micropanel"];
        full.extend_from_slice(args);
        ParsedArgs::parse(full).action
    }

    #[test]
    fn test_no_args_runs_panel() {
        assert_eq!(
            parse(&[]),
            CliAction::Run {
                options: CommonOptions::default(),
                log_file: None
            }
        );
    }

    #[test]
    fn test_run_with_flags() {
        let action = parse(&[
            "run",
            "--debug",
            "--config",
            "/tmp/mp",
            "-s",
            "http://store:5211/api/microwave",
            "--log",
            "panel.log",
        ]);
        assert_eq!(
            action,
            CliAction::Run {
                options: CommonOptions {
                    debug_enabled: true,
                    config_dir: Some("/tmp/mp".into()),
                    store_url: Some("http://store:5211/api/microwave".into()),
                },
                log_file: Some("panel.log".into()),
            }
        );
    }

    #[test]
    fn test_flags_before_command() {
        let action = parse(&["-d", "presets"]);
        assert_eq!(
            action,
            CliAction::ListPresets {
                options: CommonOptions {
                    debug_enabled: true,
                    ..CommonOptions::default()
                },
                log_file: None,
            }
        );
    }

    #[test]
    fn test_presets_keeps_log_file() {
        let action = parse(&["presets", "--log", "presets.log"]);
        assert_eq!(
            action,
            CliAction::ListPresets {
                options: CommonOptions::default(),
                log_file: Some("presets.log".into()),
            }
        );
    }

    #[test]
    fn test_help_and_version_take_precedence() {
        assert_eq!(parse(&["presets", "--help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["help"]), CliAction::ShowHelp);
        assert_eq!(parse(&["-V", "--help"]), CliAction::ShowVersion);
    }

    #[test]
    fn test_unknown_input_shows_help_with_error() {
        assert_eq!(parse(&["--bogus"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["defrost"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["run", "extra"]), CliAction::ShowHelpDueToError);
        assert_eq!(parse(&["--config"]), CliAction::ShowHelpDueToError);
    }
}
