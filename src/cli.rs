use anyhow::Result;
use clap::Parser;

use crate::env::Environment;

const BUILD_INFO_HUMAN: &str = env!("BUILD_INFO_HUMAN");

/// Environment variable consulted when neither `--open-pr` nor
/// `--no-open-pr` is given.
pub const OPEN_PR_ENV_VAR: &str = "RELEASE_PULL_REQUEST_OPEN_PR";

#[derive(Parser, Default, Debug)]
#[command(
    name = "release-pull-request",
    about = "Draft a GitHub release from an open pull request, using the PR's Summary section as release notes",
    after_help = "Negate any boolean option by prefixing it with --no-"
)]
#[command(long_version = BUILD_INFO_HUMAN)]
struct CliArgs {
    /// Repository owner (user or organisation)
    #[arg(long, value_name = "OWNER")]
    pub owner: Option<String>,

    /// Repository, either 'owner/repo' or a bare name combined with --owner
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// Open pull request to release (skips the picker)
    #[arg(long, value_name = "NUMBER")]
    pub pull: Option<u64>,

    /// Tag for the new release (default: increment the latest release's tag)
    #[arg(long, value_name = "TAG")]
    pub tag: Option<String>,

    /// Release name (default: the pull request title)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Release notes (default: the Summary section of the pull request body)
    #[arg(long, value_name = "TEXT")]
    pub body: Option<String>,

    /// GitHub token (default: $RELEASE_PULL_REQUEST_TOKEN)
    #[arg(long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Also open the pull request in the browser
    #[arg(long = "open-pr", overrides_with = "no_open_pr")]
    pub open_pr: bool,

    /// Do not open the pull request in the browser
    #[arg(long = "no-open-pr", overrides_with = "open_pr")]
    pub no_open_pr: bool,
}

/// Options for a single run, after environment fallbacks are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub pull: Option<u64>,
    pub tag: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub token: Option<String>,
    pub open_pr: bool,
}

/// Accepts exactly `1`, `true` and `yes`.
pub fn parse_bool(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "yes"))
}

fn resolve_open_pr(cli: &CliArgs, env: &dyn Environment) -> bool {
    match (cli.open_pr, cli.no_open_pr) {
        (true, _) => true,
        (_, true) => false,
        _ => parse_bool(env.var(OPEN_PR_ENV_VAR).as_deref()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parses command-line arguments into run options.
///
/// `args` includes the program name, as with `std::env::args()`. Help and
/// version requests surface as a `clap::Error` inside the returned error.
pub fn parse_args<I, T>(args: I, env: &dyn Environment) -> Result<RunOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = CliArgs::try_parse_from(args)?;
    let open_pr = resolve_open_pr(&cli, env);

    Ok(RunOptions {
        owner: non_empty(cli.owner),
        repo: non_empty(cli.repo),
        pull: cli.pull,
        tag: non_empty(cli.tag),
        name: non_empty(cli.name),
        body: cli.body,
        token: non_empty(cli.token),
        open_pr,
    })
}
