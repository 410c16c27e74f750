mod config;
mod event;
mod github;
mod issue;
mod locale;
mod render;
mod workflow;

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;

/// Challenge Bot: turns a "new-challenge" issue into a pull request that adds
/// the challenge to the repository, then reports back on the issue.
///
/// Meant to run inside GitHub Actions; every input defaults from the
/// environment the runner provides.
#[derive(Parser, Debug)]
#[command(name = "challenge-bot", version, about)]
struct Cli {
    /// Path to the webhook payload of the triggering event
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Target repository as owner/repo (defaults to the payload's repository)
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Config file (defaults to .challenge-bot.toml in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parse and validate the issue and print the files that would be
    /// committed, without calling the GitHub API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("loading configuration");
    let config = config::Config::load(cli.config.as_deref())?;

    let repo_override = match cli.repository.as_deref() {
        Some(full_name) => Some(
            github::RepoRef::parse(full_name)
                .ok_or_else(|| format!("Invalid repository '{full_name}', expected owner/repo"))?,
        ),
        None => None,
    };

    info!(path = %cli.event_path.display(), "reading event payload");
    let event = event::load(&cli.event_path, repo_override)?;
    let _main_span =
        info_span!("challenge_bot", repo = %event.repo, issue = event.issue.number).entered();
    debug!(labels = ?event.issue.labels, author = %event.issue.author, "loaded issue");

    if cli.dry_run {
        return dry_run(&config, &event.issue);
    }

    let client = github::RestClient::new(&config, event.repo.clone())?;
    let outcome = workflow::run(&client, &config, &event.issue, chrono::Utc::now()).await?;
    info!(%outcome, "finished");

    Ok(())
}

/// Print what a run would commit for `issue`.
fn dry_run(
    config: &config::Config,
    issue: &issue::Issue,
) -> Result<(), Box<dyn std::error::Error>> {
    let locale = issue.locale();
    let parsed = issue::parse(&issue.body, locale);
    let missing = parsed.missing_sections();
    let Some(submission) = workflow::validate(parsed) else {
        println!("{} missing: {}", "INVALID".red().bold(), missing.join(", "));
        println!("{}", locale.messages().invalid_issue);
        return Ok(());
    };

    let info = &submission.info;
    let dir = render::question_dir(
        &config.bot.questions_dir,
        issue.number,
        info.difficulty,
        &info.title,
    );
    println!(
        "{} {} -> {}",
        "VALID".green().bold(),
        render::pr_title(issue.number, &info.title),
        render::branch_name(issue.number)
    );
    for file in workflow::publish::generated_files(&dir, locale, &submission)? {
        println!();
        println!("═══ {} ═══", file.path.bold());
        print!("{}", file.content);
    }
    Ok(())
}
