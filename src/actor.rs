//! Decoders for the small polymorphic sub-shapes reused across event types:
//! actor-like unions (`actor`, `assignee`, `requestedReviewer`, git `user`)
//! and reference-like unions (`source`, `closer`, `canonical`, `discussion`).
//!
//! All pure mappings. A missing required discriminator is a `DecodeError`
//! the enclosing event decoder recovers from; an unrecognized discriminator
//! degrades to `ActorKind::Unknown` / an explicit absence instead of failing.

use serde_json::Value;

use crate::error::DecodeError;
use crate::model::{ActorKind, ActorRef, Closer, GitActorRef, ResourceKind, ResourceRef};

fn str_of(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Decode an actor-like union. `Ok(None)` means the field was absent or null
/// (e.g. a system-generated event with no actor).
pub fn decode_actor(value: Option<&Value>) -> Result<Option<ActorRef>, DecodeError> {
    let Some(v) = non_null(value) else {
        return Ok(None);
    };
    let kind = match v.get("__typename").and_then(Value::as_str) {
        Some("User") => ActorKind::User,
        Some("Organization") => ActorKind::Organization,
        Some("Mannequin") => ActorKind::Mannequin,
        Some("Bot") => ActorKind::Bot,
        Some("Team") => ActorKind::Team,
        Some(_) => ActorKind::Unknown,
        None => return Err(DecodeError::MissingTypename { raw: v.clone() }),
    };
    // Teams carry `name` instead of `login`; it is the only login-like
    // handle the contract selects for them.
    match str_of(v, "login").or_else(|| str_of(v, "name")) {
        Some(login) => Ok(Some(ActorRef { kind, login })),
        None => Err(DecodeError::malformed("actor", "union arm has no login", v)),
    }
}

fn repo_parts(node: &Value) -> (Option<String>, Option<String>) {
    let Some(repo) = non_null(node.get("repository")) else {
        return (None, None);
    };
    let owner = repo
        .get("owner")
        .and_then(|o| o.get("login"))
        .and_then(Value::as_str)
        .map(str::to_string);
    (owner, str_of(repo, "name"))
}

fn issue_or_pr(v: &Value, kind: ResourceKind, cross_repository: bool) -> ResourceRef {
    let (owner, repo) = repo_parts(v);
    ResourceRef {
        kind,
        owner,
        repo,
        number: v.get("number").and_then(Value::as_i64),
        oid: None,
        title: str_of(v, "title"),
        is_cross_repository: cross_repository,
    }
}

/// Decode a `source`/`canonical`-style Issue-or-PullRequest union into a weak
/// reference. `Ok(None)` covers both a null field and an arm this consumer
/// does not recognize.
pub fn decode_source(
    value: Option<&Value>,
    cross_repository: bool,
) -> Result<Option<ResourceRef>, DecodeError> {
    let Some(v) = non_null(value) else {
        return Ok(None);
    };
    match v.get("__typename").and_then(Value::as_str) {
        Some("Issue") => Ok(Some(issue_or_pr(v, ResourceKind::Issue, cross_repository))),
        Some("PullRequest") => Ok(Some(issue_or_pr(
            v,
            ResourceKind::PullRequest,
            cross_repository,
        ))),
        Some(_) => Ok(None),
        None => Err(DecodeError::MissingTypename { raw: v.clone() }),
    }
}

/// Decode a `ClosedEvent.closer`. The tri-state matters: a null field means
/// the subject was closed without a closing PR/commit, which callers must be
/// able to tell apart from a closer of unknown shape.
pub fn decode_closer(value: Option<&Value>) -> Result<Closer, DecodeError> {
    let Some(v) = non_null(value) else {
        return Ok(Closer::None);
    };
    match v.get("__typename").and_then(Value::as_str) {
        Some("PullRequest") => Ok(Closer::Resource(issue_or_pr(
            v,
            ResourceKind::PullRequest,
            false,
        ))),
        Some("Commit") => {
            let (owner, repo) = repo_parts(v);
            Ok(Closer::Resource(ResourceRef {
                kind: ResourceKind::Commit,
                owner,
                repo,
                number: None,
                oid: str_of(v, "abbreviatedOid"),
                title: None,
                is_cross_repository: false,
            }))
        }
        Some(_) => Ok(Closer::Unrecognized { raw: v.clone() }),
        None => Err(DecodeError::MissingTypename { raw: v.clone() }),
    }
}

/// Decode a `ConvertedToDiscussionEvent.discussion`. Not a union: always a
/// Discussion when present.
pub fn decode_discussion(value: Option<&Value>) -> Option<ResourceRef> {
    let v = non_null(value)?;
    let mut r = ResourceRef::new(ResourceKind::Discussion);
    r.number = v.get("number").and_then(Value::as_i64);
    r.title = str_of(v, "title");
    Some(r)
}

/// Decode a `ReferencedEvent` commit + repository pair into one weak
/// reference; `title` carries the commit message headline.
pub fn decode_commit_ref(
    commit: Option<&Value>,
    commit_repository: Option<&Value>,
    cross_repository: bool,
) -> Option<ResourceRef> {
    let c = non_null(commit)?;
    let (owner, repo) = match non_null(commit_repository) {
        Some(r) => {
            let owner = r
                .get("owner")
                .and_then(|o| o.get("login"))
                .and_then(Value::as_str)
                .map(str::to_string);
            (owner, str_of(r, "name"))
        }
        None => (None, None),
    };
    Some(ResourceRef {
        kind: ResourceKind::Commit,
        owner,
        repo,
        number: None,
        oid: str_of(c, "abbreviatedOid"),
        title: str_of(c, "messageHeadline"),
        is_cross_repository: cross_repository,
    })
}

/// Decode a git author/committer identity with its optional platform account.
pub fn decode_git_actor(value: Option<&Value>) -> Option<GitActorRef> {
    let v = non_null(value)?;
    let user = non_null(v.get("user"))
        .and_then(|u| u.get("login"))
        .and_then(Value::as_str)
        .map(ActorRef::user);
    Some(GitActorRef {
        name: str_of(v, "name"),
        user,
    })
}
