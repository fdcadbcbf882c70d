//! Gatepost CLI - publish quality gate results on a pull request
//!
//! The `gatepost` command runs one decoration pass per analysis run:
//! stale annotations and comments from earlier runs are removed, then the
//! new summary is posted as a review or a conversation comment.
//!
//! ## Commands
//!
//! - `decorate`: post a pre-rendered summary for a gate outcome
//! - `nothing-analyzed`: post the fixed "nothing analyzed" decoration
//!
//! Connection settings default to the GitHub Actions environment.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use gatepost_core::{
    emit_decoration_skipped, DecorationConfig, DecorationRequest, Decorator, VerdictTag,
};
use gatepost_github::{parse_pull_number, GitHubClient, GitHubConfig};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "gatepost")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Decorate pull requests with quality gate results", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    github: GitHubArgs,

    #[command(flatten)]
    decoration: DecorationArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where to decorate. Unset flags fall back to the GitHub Actions environment.
#[derive(Args, Debug, Clone, Default)]
struct GitHubArgs {
    /// GitHub REST API base URL [env: GITHUB_API_URL]
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Repository as owner/repo [env: GITHUB_REPOSITORY]
    #[arg(long, global = true)]
    repository: Option<String>,

    /// Token with pull request write access [env: GITHUB_TOKEN]
    #[arg(long, global = true)]
    token: Option<String>,

    /// Pull request number [env: GATEPOST_PULL_REQUEST]
    #[arg(long, global = true, value_parser = parse_pull_request)]
    pull_request: Option<u64>,

    /// GitHub Actions event payload, read when no pull request is given [env: GITHUB_EVENT_PATH]
    #[arg(long, global = true)]
    event_path: Option<PathBuf>,
}

/// How to decorate
#[derive(Args, Debug, Clone, Copy)]
struct DecorationArgs {
    /// Post the summary to the pull request conversation at all
    #[arg(
        long,
        global = true,
        env = "GATEPOST_POST_TO_CONVERSATION",
        default_value_t = true,
        action = ArgAction::Set
    )]
    post_to_conversation: bool,

    /// Post a formal review with a verdict instead of a plain comment
    #[arg(
        long,
        global = true,
        env = "GATEPOST_PULL_REQUEST_APPROVAL",
        default_value_t = false,
        action = ArgAction::Set
    )]
    pull_request_approval: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a pre-rendered quality gate summary
    Decorate {
        /// File holding the summary body ("-" for stdin)
        #[arg(long)]
        body_file: PathBuf,

        /// Outcome of the quality gate for this run
        #[arg(long, value_enum, default_value_t = GateState::Absent)]
        quality_gate: GateState,

        /// Override the verdict chosen from the gate outcome
        #[arg(long, value_enum)]
        verdict: Option<VerdictArg>,
    },

    /// Post the "nothing analyzed" decoration (counts as a passed gate)
    NothingAnalyzed {
        /// Explanation shown under the passed heading
        #[arg(short, long)]
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GateState {
    /// No quality gate was evaluated
    #[value(name = "none")]
    Absent,
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VerdictArg {
    Approve,
    RequestChanges,
    Comment,
}

impl From<VerdictArg> for VerdictTag {
    fn from(arg: VerdictArg) -> Self {
        match arg {
            VerdictArg::Approve => VerdictTag::Approve,
            VerdictArg::RequestChanges => VerdictTag::RequestChanges,
            VerdictArg::Comment => VerdictTag::Comment,
        }
    }
}

fn parse_pull_request(raw: &str) -> std::result::Result<u64, String> {
    parse_pull_number(raw).map_err(|e| e.to_string())
}

impl GitHubArgs {
    /// Flag value for a GitHub Actions variable name.
    fn lookup(&self, name: &str) -> Option<String> {
        match name {
            "GITHUB_API_URL" => self.api_url.clone(),
            "GITHUB_REPOSITORY" => self.repository.clone(),
            "GITHUB_TOKEN" => self.token.clone(),
            "GATEPOST_PULL_REQUEST" => self.pull_request.map(|n| n.to_string()),
            "GITHUB_EVENT_PATH" => self
                .event_path
                .as_ref()
                .map(|p| p.display().to_string()),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        self.api_url.is_none()
            && self.repository.is_none()
            && self.token.is_none()
            && self.pull_request.is_none()
            && self.event_path.is_none()
    }

    fn to_config(&self) -> Result<GitHubConfig> {
        let config = if self.is_empty() {
            GitHubConfig::from_env()
        } else {
            GitHubConfig::from_lookup(|name| {
                self.lookup(name).or_else(|| std::env::var(name).ok())
            })
        };
        config.context("Incomplete GitHub connection settings")
    }
}

impl DecorationArgs {
    fn to_config(self) -> DecorationConfig {
        DecorationConfig {
            post_to_conversation: self.post_to_conversation,
            pull_request_approval: self.pull_request_approval,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    gatepost_core::init_tracing(cli.json, level);

    let config = cli.decoration.to_config();
    if !config.post_to_conversation {
        emit_decoration_skipped();
        return Ok(());
    }

    let request = match &cli.command {
        Commands::Decorate {
            body_file,
            quality_gate,
            verdict,
        } => build_request(read_body(body_file)?, *quality_gate, *verdict),
        Commands::NothingAnalyzed { message } => DecorationRequest::nothing_analyzed(message),
    };

    let github = cli.github.to_config()?;
    info!(
        repository = %format!("{}/{}", github.owner, github.repo),
        pull_request = github.pull_number,
        "Decorating pull request"
    );
    let client = Arc::new(GitHubClient::new(github).context("Failed to create GitHub client")?);
    let decorator = Decorator::new(client.clone(), client);

    let action = decorator
        .decorate(&config, &request)
        .await
        .context("Decoration pass failed")?;
    info!(action = %action, "Decoration complete");

    Ok(())
}

fn build_request(body: String, gate: GateState, verdict: Option<VerdictArg>) -> DecorationRequest {
    let request = match gate {
        GateState::Absent => DecorationRequest::without_gate(body),
        GateState::Passed => DecorationRequest::with_gate(body, false),
        GateState::Failed => DecorationRequest::with_gate(body, true),
    };
    match verdict {
        Some(verdict) => request.with_verdict(verdict.into()),
        None => request,
    }
}

fn read_body(path: &Path) -> Result<String> {
    let body = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read summary from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read summary from {}", path.display()))?
    };

    if body.trim().is_empty() {
        bail!("Summary body is empty");
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn github_args() -> GitHubArgs {
        GitHubArgs {
            repository: Some("acme/widgets".to_string()),
            token: Some("t".to_string()),
            pull_request: Some(4),
            ..GitHubArgs::default()
        }
    }

    #[test]
    fn test_cli_parses_decorate() {
        let cli = Cli::try_parse_from([
            "gatepost",
            "decorate",
            "--body-file",
            "summary.md",
            "--quality-gate",
            "failed",
            "--verdict",
            "request-changes",
            "--pull-request-approval",
            "true",
        ])
        .unwrap();

        assert!(cli.decoration.pull_request_approval);
        match cli.command {
            Commands::Decorate {
                body_file,
                quality_gate,
                verdict,
            } => {
                assert_eq!(body_file, PathBuf::from("summary.md"));
                assert_eq!(quality_gate, GateState::Failed);
                assert_eq!(verdict, Some(VerdictArg::RequestChanges));
            }
            Commands::NothingAnalyzed { .. } => panic!("expected decorate"),
        }
    }

    #[test]
    fn test_cli_quality_gate_defaults_to_none() {
        let cli = Cli::try_parse_from(["gatepost", "decorate", "--body-file", "-"]).unwrap();
        match cli.command {
            Commands::Decorate { quality_gate, .. } => assert_eq!(quality_gate, GateState::Absent),
            Commands::NothingAnalyzed { .. } => panic!("expected decorate"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_pull_request() {
        let result = Cli::try_parse_from([
            "gatepost",
            "nothing-analyzed",
            "--message",
            "m",
            "--pull-request",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_request_maps_gate_states() {
        let none = build_request("b".to_string(), GateState::Absent, None);
        assert!(!none.has_quality_gate);

        let passed = build_request("b".to_string(), GateState::Passed, None);
        assert!(passed.has_quality_gate && !passed.gate_failed);

        let failed = build_request(
            "b".to_string(),
            GateState::Failed,
            Some(VerdictArg::Comment),
        );
        assert!(failed.gate_failed);
        assert_eq!(failed.explicit_verdict, Some(VerdictTag::Comment));
    }

    #[test]
    fn test_read_body_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "## Quality gate failed").unwrap();
        assert_eq!(read_body(file.path()).unwrap(), "## Quality gate failed");
    }

    #[test]
    fn test_read_body_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_body(file.path()).is_err());
    }

    #[test]
    fn test_github_args_to_config() {
        let config = github_args().to_config().unwrap();
        assert_eq!(config.owner, "acme");
        assert_eq!(config.pull_number, 4);
    }

    #[test]
    fn test_github_args_lookup_maps_flags() {
        let args = GitHubArgs {
            api_url: Some("https://ghe.example.com/api/v3".to_string()),
            event_path: Some(PathBuf::from("/tmp/event.json")),
            ..github_args()
        };
        assert_eq!(
            args.lookup("GITHUB_API_URL").as_deref(),
            Some("https://ghe.example.com/api/v3")
        );
        assert_eq!(args.lookup("GATEPOST_PULL_REQUEST").as_deref(), Some("4"));
        assert_eq!(
            args.lookup("GITHUB_EVENT_PATH").as_deref(),
            Some("/tmp/event.json")
        );
        assert_eq!(args.lookup("HOME"), None);
    }

    #[test]
    fn test_github_args_pull_request_flag_beats_event_payload() {
        let mut event = tempfile::NamedTempFile::new().unwrap();
        write!(event, r#"{{"pull_request":{{"number":31}}}}"#).unwrap();
        let args = GitHubArgs {
            event_path: Some(event.path().to_path_buf()),
            ..github_args()
        };
        let config = GitHubConfig::from_lookup(|name| args.lookup(name)).unwrap();
        assert_eq!(config.pull_number, 4);
    }

    #[test]
    fn test_github_args_reads_event_payload() {
        let mut event = tempfile::NamedTempFile::new().unwrap();
        write!(event, r#"{{"pull_request":{{"number":31}}}}"#).unwrap();
        let args = GitHubArgs {
            pull_request: None,
            event_path: Some(event.path().to_path_buf()),
            ..github_args()
        };
        let config = GitHubConfig::from_lookup(|name| args.lookup(name)).unwrap();
        assert_eq!(config.pull_number, 31);
    }

    #[test]
    fn test_github_args_requires_repository_and_pull_request() {
        let no_repo = GitHubArgs {
            repository: None,
            ..github_args()
        };
        assert!(GitHubConfig::from_lookup(|name| no_repo.lookup(name)).is_err());

        let no_pull = GitHubArgs {
            pull_request: None,
            ..github_args()
        };
        assert!(GitHubConfig::from_lookup(|name| no_pull.lookup(name)).is_err());
    }

    #[test]
    fn test_cli_without_connection_flags_defers_to_environment() {
        let cli = Cli::try_parse_from(["gatepost", "nothing-analyzed", "-m", "m"]).unwrap();
        assert!(cli.github.is_empty());
        assert!(!github_args().is_empty());
    }
}
