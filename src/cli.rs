//! Command-line interface definitions for the `critique` tool.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::prompt::AnalysisMode;

/// AI code review from your terminal
#[derive(Parser, Debug)]
#[command(
    name = "critique",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("CRITIQUE_GIT_SHA"), ")"),
    about,
    long_about = None
)]
#[command(
    after_help = "EXAMPLES:\n    critique src/lib.py\n    cat snippet.rs | critique --mode bugs-only\n    critique --code \"def f(): return 1/0\" --json"
)]
pub struct Cli {
    /// Source file to analyze ("-" or omitted reads stdin)
    pub file: Option<PathBuf>,

    /// Inline code to analyze instead of a file
    #[arg(long, value_name = "CODE", conflicts_with = "file")]
    pub code: Option<String>,

    /// Analysis to request
    #[arg(long, value_enum, default_value_t = AnalysisMode::FullAudit)]
    pub mode: AnalysisMode,

    /// Model identifier (overrides config)
    #[arg(long, short = 'm', value_name = "ID")]
    pub model: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output the report as JSON
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Show debug info (rendered prompt and request parameters)
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Quiet mode - no status messages, report body only
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Prompt for a new API key and save it
    #[arg(long)]
    pub set_key: bool,

    /// Output default configuration to stdout
    #[arg(long)]
    pub print_config: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parses_file_argument() {
        let cli = Cli::parse_from(["critique", "src/lib.py"]);
        assert_eq!(cli.file, Some(PathBuf::from("src/lib.py")));
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_defaults_to_full_audit() {
        let cli = Cli::parse_from(["critique"]);
        assert_eq!(cli.mode, AnalysisMode::FullAudit);
    }

    #[test]
    fn test_cli_parses_mode_values() {
        let cli = Cli::parse_from(["critique", "--mode", "bugs-only"]);
        assert_eq!(cli.mode, AnalysisMode::BugsOnly);

        let cli = Cli::parse_from(["critique", "--mode", "style-check"]);
        assert_eq!(cli.mode, AnalysisMode::StyleCheck);

        let cli = Cli::parse_from(["critique", "--mode", "explain"]);
        assert_eq!(cli.mode, AnalysisMode::Explain);

        let cli = Cli::parse_from(["critique", "--mode", "full-audit"]);
        assert_eq!(cli.mode, AnalysisMode::FullAudit);
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["critique", "--mode", "everything"]).is_err());
    }

    #[test]
    fn test_cli_parses_inline_code() {
        let cli = Cli::parse_from(["critique", "--code", "x = 1"]);
        assert_eq!(cli.code, Some("x = 1".to_string()));
    }

    #[test]
    fn test_cli_inline_code_conflicts_with_file() {
        assert!(Cli::try_parse_from(["critique", "main.py", "--code", "x = 1"]).is_err());
    }

    #[test]
    fn test_cli_parses_json_flag() {
        let cli = Cli::parse_from(["critique", "--json", "main.py"]);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_parses_short_json_flag() {
        let cli = Cli::parse_from(["critique", "-j", "main.py"]);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_parses_debug_flag() {
        let cli = Cli::parse_from(["critique", "-d", "main.py"]);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_parses_model_override() {
        let cli = Cli::parse_from(["critique", "-m", "acme/reviewer", "main.py"]);
        assert_eq!(cli.model, Some("acme/reviewer".to_string()));
    }

    #[test]
    fn test_cli_parses_timeout_override() {
        let cli = Cli::parse_from(["critique", "--timeout", "30", "main.py"]);
        assert_eq!(cli.timeout, Some(30));
    }

    #[test]
    fn test_cli_parses_set_key() {
        let cli = Cli::parse_from(["critique", "--set-key"]);
        assert!(cli.set_key);
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_cli_parses_completions() {
        let cli = Cli::parse_from(["critique", "--completions", "bash"]);
        assert_eq!(cli.completions, Some(Shell::Bash));
    }

    #[test]
    fn test_cli_parses_print_config() {
        let cli = Cli::parse_from(["critique", "--print-config"]);
        assert!(cli.print_config);
    }

    #[test]
    fn test_cli_debug_and_json_together() {
        let cli = Cli::parse_from(["critique", "-d", "-j", "main.py"]);
        assert!(cli.debug);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_stdin_dash() {
        let cli = Cli::parse_from(["critique", "-"]);
        assert_eq!(cli.file, Some(PathBuf::from("-")));
    }
}
