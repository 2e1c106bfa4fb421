use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use servease_core::{MatchMode, UnmatchedPolicy};

#[derive(Debug, Parser)]
#[command(name = "servease")]
#[command(about = "Assign a service or installation request to a field technician")]
pub(crate) struct Cli {
    /// Request JSON with `customer` and `job`; `-` reads stdin.
    #[arg(long, short, default_value = "-")]
    pub request: PathBuf,

    /// TOML configuration file.
    #[arg(long, short, env = "SERVEASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip the external postal code lookup.
    #[arg(long)]
    pub offline: bool,

    /// Override the configured matching policy.
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchModeArg>,

    /// Override the configured handling of unmatched requests.
    #[arg(long, value_enum)]
    pub unmatched: Option<UnmatchedArg>,

    /// Enable debug logging.
    #[arg(long, short)]
    pub verbose: bool,

    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MatchModeArg {
    Strict,
    Lenient,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Strict => MatchMode::Strict,
            MatchModeArg::Lenient => MatchMode::Lenient,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum UnmatchedArg {
    Reject,
    Pending,
}

impl From<UnmatchedArg> for UnmatchedPolicy {
    fn from(arg: UnmatchedArg) -> Self {
        match arg {
            UnmatchedArg::Reject => UnmatchedPolicy::Reject,
            UnmatchedArg::Pending => UnmatchedPolicy::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormat {
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_read_stdin_and_keep_config_policies() {
        let cli = Cli::try_parse_from(["servease"]).expect("parses");
        assert_eq!(cli.request, PathBuf::from("-"));
        assert!(cli.match_mode.is_none());
        assert!(cli.unmatched.is_none());
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn policy_overrides_parse() {
        let cli = Cli::try_parse_from([
            "servease",
            "--request",
            "req.json",
            "--match-mode",
            "lenient",
            "--unmatched",
            "pending",
            "--offline",
        ])
        .expect("parses");
        assert_eq!(cli.match_mode.map(MatchMode::from), Some(MatchMode::Lenient));
        assert_eq!(
            cli.unmatched.map(UnmatchedPolicy::from),
            Some(UnmatchedPolicy::Pending)
        );
        assert!(cli.offline);
    }
}
