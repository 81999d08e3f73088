use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod change_id;
mod cli;
mod config;
mod error;
mod git;
mod message;
mod pipeline;
mod skip;
mod util;

use cli::{ChangeIdArgs, Command, InstallArgs, RootArgs, RunArgs};
use git::{GitCli, Repository};

/// Environment variable holding the `tracing` filter directives.
const LOG_ENV: &str = "CTRAIL_LOG";

fn main() -> ExitCode {
    init_tracing();
    if let Err(err) = real_main() {
        tracing::error!("{err:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn real_main() -> Result<()> {
    let cli = RootArgs::parse();
    let repo = GitCli::new(std::env::current_dir().context("resolve working directory")?);
    match cli.command {
        Command::Run(args) => cmd_run(args, &repo),
        Command::ChangeId(args) => cmd_change_id(args, &repo),
        Command::Install(args) => cmd_install(args, &repo),
    }
}

fn cmd_run(args: RunArgs, repo: &GitCli) -> Result<()> {
    let config = config::load_config(repo, args.config.as_deref())?;
    let report = pipeline::run_hook(&args.message_file, repo, &config)?;
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize hook report")?;
        println!("{json}");
    }
    Ok(())
}

fn cmd_change_id(args: ChangeIdArgs, repo: &GitCli) -> Result<()> {
    let config = config::load_config(repo, args.config.as_deref())?;
    let message = pipeline::load_message(&args.message_file, &config)?;
    let change_id = pipeline::compute_change_id(&message, repo)?
        .ok_or_else(|| anyhow!("{} has no message text", args.message_file.display()))?;
    println!("{change_id}");
    Ok(())
}

fn cmd_install(args: InstallArgs, repo: &GitCli) -> Result<()> {
    let hooks_dir = repo.hooks_dir().context("locate hooks directory")?;
    std::fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("create {}", hooks_dir.display()))?;
    let hook_path = hooks_dir.join("commit-msg");
    if hook_path.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists (use --force to replace it)",
            hook_path.display()
        ));
    }
    let exe = std::env::current_exe().context("resolve ctrail executable")?;
    util::write_atomic(&hook_path, hook_script(&exe).as_bytes())
        .with_context(|| format!("write {}", hook_path.display()))?;
    make_executable(&hook_path)?;
    let cwd = std::env::current_dir().ok();
    println!(
        "Installed commit-msg hook at {}",
        util::display_path(&hook_path, cwd.as_deref())
    );
    Ok(())
}

fn hook_script(exe: &Path) -> String {
    format!(
        "#!/bin/sh\n# Installed by ctrail install.\nexec '{}' run \"$1\"\n",
        exe.display().to_string().replace('\'', r"'\''")
    )
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .with_context(|| format!("chmod {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
