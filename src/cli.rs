use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("gh-timeline")
        .about("Fetch and normalize a GitHub issue/PR activity timeline")
        .arg(
            Arg::new("repo")
                .value_name("OWNER/REPO")
                .required_unless_present("version")
                .help("Repository the subject lives in"),
        )
        .arg(
            Arg::new("number")
                .value_name("NUMBER")
                .required_unless_present("version")
                .value_parser(clap::value_parser!(i64))
                .help("Issue or pull request number"),
        )
        .arg(
            Arg::new("pull-request")
                .long("pull-request")
                .action(ArgAction::SetTrue)
                .help("Treat the subject as a pull request"),
        )
        .arg(
            Arg::new("linkage")
                .long("linkage")
                .conflicts_with("pull-request")
                .action(ArgAction::SetTrue)
                .help("Minimal issue profile: closure/cross-link detection only"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .num_args(1)
                .help("Override RUST_LOG level (e.g., info, debug)"),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print version and exit")
                .action(ArgAction::SetTrue),
        )
}

pub fn init_logging(level: Option<&str>) {
    // Respect explicit level, else default to info, allow env override via RUST_LOG
    if let Some(lvl) = level {
        std::env::set_var("RUST_LOG", lvl);
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Split an `owner/repo` argument.
pub fn split_repo(s: &str) -> Option<(&str, &str)> {
    let (owner, repo) = s.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_repo_accepts_owner_slash_repo() {
        assert_eq!(split_repo("acme/widgets"), Some(("acme", "widgets")));
        assert_eq!(split_repo("acme"), None);
        assert_eq!(split_repo("acme/"), None);
        assert_eq!(split_repo("a/b/c"), None);
    }
}
