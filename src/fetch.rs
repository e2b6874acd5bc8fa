//! Per-resource fetch: one GraphQL request per issue/PR (the contract has no
//! pagination loop), decoded into an `ActivityModel`. Independent resources
//! can be fetched concurrently with a caller-supplied bound.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde_json::{json, Value};

use crate::assemble;
use crate::config::Config;
use crate::error::{DecodeError, Error, Result};
use crate::http;
use crate::model::{ActivityModel, IssueLinkage, SubjectKind};
use crate::page;
use crate::queries;

/// Identifies one issue or pull request to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectId {
    pub kind: SubjectKind,
    pub owner: String,
    pub repo: String,
    pub number: i64,
}

fn vars(owner: &str, repo: &str, number: i64) -> Value {
    json!({ "owner": owner, "repo": repo, "number": number })
}

fn kind_name(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Issue => "issue",
        SubjectKind::PullRequest => "pull request",
    }
}

/// Fetch and normalize one timeline, full profile.
pub async fn timeline(
    client: &Client,
    cfg: &Config,
    kind: SubjectKind,
    owner: &str,
    repo: &str,
    number: i64,
) -> Result<ActivityModel> {
    let query = match kind {
        SubjectKind::Issue => queries::ISSUE_TIMELINE_QUERY,
        SubjectKind::PullRequest => queries::PULL_REQUEST_TIMELINE_QUERY,
    };
    let data = http::graphql_post(client, cfg, query, &vars(owner, repo, number)).await?;
    let subject = page::subject_node(&data, kind).ok_or_else(|| Error::NotFound {
        kind: kind_name(kind),
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })?;
    let decoded = page::extract(page::timeline_items(subject)?)?;
    Ok(assemble::assemble(kind, decoded))
}

pub async fn issue_timeline(
    client: &Client,
    cfg: &Config,
    owner: &str,
    repo: &str,
    number: i64,
) -> Result<ActivityModel> {
    timeline(client, cfg, SubjectKind::Issue, owner, repo, number).await
}

pub async fn pull_request_timeline(
    client: &Client,
    cfg: &Config,
    owner: &str,
    repo: &str,
    number: i64,
) -> Result<ActivityModel> {
    timeline(client, cfg, SubjectKind::PullRequest, owner, repo, number).await
}

/// Fetch the minimal linkage profile of an issue: subject fields plus a
/// timeline limited to closure/cross-link detection, with no `createdAt`
/// anywhere (events come back undated and keep edge order).
pub async fn issue_linkage(
    client: &Client,
    cfg: &Config,
    owner: &str,
    repo: &str,
    number: i64,
) -> Result<IssueLinkage> {
    let data = http::graphql_post(
        client,
        cfg,
        queries::ISSUE_LINKAGE_QUERY,
        &vars(owner, repo, number),
    )
    .await?;
    let subject = page::subject_node(&data, SubjectKind::Issue).ok_or_else(|| Error::NotFound {
        kind: "issue",
        owner: owner.to_string(),
        repo: repo.to_string(),
        number,
    })?;
    let decoded = page::extract(page::timeline_items(subject)?)?;

    let title = subject
        .get("title")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::MalformedPage("issue has no title".to_string()))?
        .to_string();
    let state = subject
        .get("state")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::MalformedPage("issue has no state".to_string()))?
        .to_string();

    Ok(IssueLinkage {
        title,
        body: subject
            .get("body")
            .and_then(Value::as_str)
            .map(str::to_string),
        closed: subject
            .get("closed")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        state,
        state_reason: subject
            .get("stateReason")
            .and_then(Value::as_str)
            .map(str::to_string),
        timeline: assemble::assemble(SubjectKind::Issue, decoded),
    })
}

/// Fetch several independent timelines concurrently, at most `limit` in
/// flight at once (respecting upstream rate limits is the caller's reason to
/// pick a bound). Results come back in input order; one failed fetch does
/// not abort the others.
pub async fn timelines(
    client: &Client,
    cfg: &Config,
    subjects: Vec<SubjectId>,
    limit: usize,
) -> Vec<Result<ActivityModel>> {
    stream::iter(subjects.into_iter().map(|s| async move {
        timeline(client, cfg, s.kind, &s.owner, &s.repo, s.number).await
    }))
    .buffered(limit.max(1))
    .collect()
    .await
}
