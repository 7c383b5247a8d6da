use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tag-validate",
    version,
    about = "Release-tag signing policy checks against code-review services"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Verify if a specific GPG key ID or SSH fingerprint is registered on Gerrit
    Gerrit(GerritArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GerritArgs {
    /// GPG key ID or SSH fingerprint to check
    pub key: String,

    /// Account owner: email address or username
    #[arg(short, long)]
    pub owner: String,

    /// Gerrit server hostname (e.g. gerrit.onap.org)
    #[arg(short, long)]
    pub server: Option<String>,

    /// GitHub organization to auto-discover the Gerrit server from
    #[arg(long, conflicts_with = "server")]
    pub github_org: Option<String>,

    /// Key type: gpg or ssh (auto-detected when omitted)
    #[arg(short = 't', long = "type")]
    pub key_type: Option<String>,

    /// Gerrit HTTP username for authenticated lookups
    #[arg(long, env = "GERRIT_USERNAME")]
    pub gerrit_username: Option<String>,

    /// Gerrit HTTP password (or API token)
    #[arg(long, env = "GERRIT_PASSWORD", hide_env_values = true)]
    pub gerrit_password: Option<String>,

    /// Emit JSON instead of text
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Validate CLI plumbing without contacting Gerrit
    #[arg(long)]
    pub test_mode: bool,
}
