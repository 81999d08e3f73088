//! CLI argument parsing for the commit-msg hook.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "ctrail",
    version,
    about = "commit-msg hook that adds Change-Id trailers and tidies Bug: references",
    after_help = "Examples:\n  ctrail install\n  ctrail run .git/COMMIT_EDITMSG\n  ctrail change-id .git/COMMIT_EDITMSG",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Run(RunArgs),
    ChangeId(ChangeIdArgs),
    Install(InstallArgs),
}

/// Hook invocation: rewrite the message file in place.
#[derive(Parser, Debug)]
#[command(about = "Process a commit message file (commit-msg hook entrypoint)")]
pub struct RunArgs {
    /// Commit message file passed by git
    #[arg(value_name = "MSG_FILE")]
    pub message_file: PathBuf,

    /// JSON config file layered under git config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the run outcome as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Print the Change-Id that would be added, without editing the file")]
pub struct ChangeIdArgs {
    /// Commit message file
    #[arg(value_name = "MSG_FILE")]
    pub message_file: PathBuf,

    /// JSON config file layered under git config
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(about = "Install the commit-msg hook into the current repository")]
pub struct InstallArgs {
    /// Overwrite an existing commit-msg hook
    #[arg(long)]
    pub force: bool,
}
