mod cli;

use anyhow::Context;
use gh_timeline::config::Config;
use gh_timeline::{fetch, http};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches();
    let log_level = matches.get_one::<String>("log-level").cloned();
    cli::init_logging(log_level.as_deref());

    if matches.get_flag("version") {
        println!("gh-timeline {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let repo_arg = matches
        .get_one::<String>("repo")
        .context("missing OWNER/REPO")?;
    let (owner, repo) = cli::split_repo(repo_arg).context("expected OWNER/REPO")?;
    let number = *matches
        .get_one::<i64>("number")
        .context("missing issue/PR number")?;

    let cfg = Config::from_env()?;
    let client = http::build_client(&cfg)?;

    let output = if matches.get_flag("linkage") {
        let linkage = fetch::issue_linkage(&client, &cfg, owner, repo, number).await?;
        serde_json::to_value(linkage)?
    } else if matches.get_flag("pull-request") {
        let model = fetch::pull_request_timeline(&client, &cfg, owner, repo, number).await?;
        serde_json::to_value(model)?
    } else {
        let model = fetch::issue_timeline(&client, &cfg, owner, repo, number).await?;
        serde_json::to_value(model)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
