//! Per-node normalization: maps one raw timeline node into exactly one
//! `TimelineEvent` variant, dispatching on `__typename`.
//!
//! Decoding a node never fails past this boundary. An unrecognized
//! `__typename` or a locally malformed node becomes `EventKind::Unknown`
//! with the raw payload preserved verbatim, so one bad node cannot destroy
//! the rest of an otherwise-decodable timeline.

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::Value;

use crate::actor::{
    decode_actor, decode_closer, decode_commit_ref, decode_discussion, decode_git_actor,
    decode_source,
};
use crate::error::DecodeError;
use crate::model::{
    Commit, CommentState, EventKind, LabelRef, LockReason, Review, ReviewComment, ReviewState,
    ReviewThread, TimelineEvent, Timestamp,
};
use crate::queries::COMMENT_PAGE_SIZE;

/// Decode one raw timeline node.
pub fn decode(node: &Value) -> TimelineEvent {
    match decode_node(node) {
        Ok(event) => event,
        Err(err) => {
            debug!("downgrading timeline node to unknown: {err}");
            unknown_event(node)
        }
    }
}

fn unknown_event(node: &Value) -> TimelineEvent {
    let type_name = node
        .get("__typename")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    TimelineEvent {
        id: str_of(node, "id"),
        timestamp: timestamp_of(node),
        actor: None,
        kind: EventKind::Unknown {
            type_name,
            raw: node.clone(),
        },
    }
}

fn decode_node(node: &Value) -> Result<TimelineEvent, DecodeError> {
    let type_name = node
        .get("__typename")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::MissingTypename { raw: node.clone() })?;

    let Some(kind) = decode_kind(type_name, node)? else {
        // Forward compatibility: the upstream schema evolves independently
        // of this consumer.
        return Ok(unknown_event(node));
    };

    // Comment-like nodes attribute via `author`; everything else via `actor`.
    let actor_field = match type_name {
        "IssueComment" | "PullRequestReview" => node.get("author"),
        "PullRequestCommit" => None,
        _ => node.get("actor"),
    };
    let actor = match &kind {
        // A commit's envelope actor is its committer's platform account,
        // when one is linked.
        EventKind::Commit(c) => c.committer.as_ref().and_then(|g| g.user.clone()),
        _ => decode_actor(actor_field)?,
    };
    let timestamp = match &kind {
        EventKind::Commit(c) => c.committed_date,
        _ => timestamp_of(node),
    };

    Ok(TimelineEvent {
        id: str_of(node, "id"),
        timestamp,
        actor,
        kind,
    })
}

fn decode_kind(type_name: &str, node: &Value) -> Result<Option<EventKind>, DecodeError> {
    let kind = match type_name {
        "AssignedEvent" => EventKind::Assigned {
            assignee: decode_actor(node.get("assignee"))?,
        },
        "UnassignedEvent" => EventKind::Unassigned {
            assignee: decode_actor(node.get("assignee"))?,
        },
        "LabeledEvent" => EventKind::Labeled {
            label: label_of(type_name, node)?,
        },
        "UnlabeledEvent" => EventKind::Unlabeled {
            label: label_of(type_name, node)?,
        },
        "ClosedEvent" => EventKind::Closed {
            closer: decode_closer(node.get("closer"))?,
        },
        "ReopenedEvent" => EventKind::Reopened,
        "ConnectedEvent" => EventKind::Connected {
            source: decode_source(node.get("source"), false)?,
        },
        "CrossReferencedEvent" => EventKind::CrossReferenced {
            source: decode_source(node.get("source"), bool_of(node, "isCrossRepository"))?,
        },
        "ReferencedEvent" => EventKind::Referenced {
            commit: decode_commit_ref(
                node.get("commit"),
                node.get("commitRepository"),
                bool_of(node, "isCrossRepository"),
            ),
        },
        "IssueComment" => EventKind::Commented {
            body: required_str(type_name, node, "body")?,
        },
        "PullRequestReview" => EventKind::Review(decode_review(node)?),
        "PullRequestReviewThread" => {
            let (comments, comments_truncated) = decode_comments(node.get("comments"));
            EventKind::ReviewThread(ReviewThread {
                comments,
                comments_truncated,
            })
        }
        "PullRequestCommit" => EventKind::Commit(decode_commit(node)?),
        "MergedEvent" => EventKind::Merged {
            merge_ref_name: str_of(node, "mergeRefName"),
        },
        "LockedEvent" => EventKind::Locked {
            reason: node
                .get("lockReason")
                .and_then(Value::as_str)
                .map(lock_reason),
        },
        "UnlockedEvent" => EventKind::Unlocked,
        "PinnedEvent" => EventKind::Pinned,
        "UnpinnedEvent" => EventKind::Unpinned,
        "MilestonedEvent" => EventKind::Milestoned {
            title: required_str(type_name, node, "milestoneTitle")?,
        },
        "DemilestonedEvent" => EventKind::Demilestoned {
            title: required_str(type_name, node, "milestoneTitle")?,
        },
        "MarkedAsDuplicateEvent" => EventKind::MarkedDuplicate {
            canonical: decode_source(node.get("canonical"), false)?,
        },
        "UnmarkedAsDuplicateEvent" => EventKind::UnmarkedDuplicate,
        "RenamedTitleEvent" => EventKind::RenamedTitle {
            previous: required_str(type_name, node, "previousTitle")?,
            current: required_str(type_name, node, "currentTitle")?,
        },
        "ConvertedToDiscussionEvent" => EventKind::ConvertedToDiscussion {
            discussion: decode_discussion(node.get("discussion")),
        },
        "HeadRefForcePushedEvent" => EventKind::ForcePushed {
            before: oid_of(node.get("beforeCommit")),
            after: oid_of(node.get("afterCommit")),
        },
        "HeadRefDeletedEvent" => EventKind::HeadDeleted {
            ref_name: required_str(type_name, node, "headRefName")?,
        },
        "ReviewRequestedEvent" => EventKind::ReviewRequested {
            reviewer: decode_actor(node.get("requestedReviewer"))?,
        },
        "ReviewRequestRemovedEvent" => EventKind::ReviewRequestRemoved {
            reviewer: decode_actor(node.get("requestedReviewer"))?,
        },
        "ConvertToDraftEvent" => EventKind::ConvertedToDraft,
        "ReadyForReviewEvent" => EventKind::ReadyForReview,
        _ => return Ok(None),
    };
    Ok(Some(kind))
}

fn decode_review(node: &Value) -> Result<Review, DecodeError> {
    let state = node
        .get("state")
        .and_then(Value::as_str)
        .map(review_state)
        .ok_or_else(|| DecodeError::malformed("PullRequestReview", "missing state", node))?;
    let body = str_of(node, "body").filter(|b| !b.is_empty());
    let (comments, comments_truncated) = decode_comments(node.get("comments"));
    Ok(Review {
        author: decode_actor(node.get("author"))?,
        body,
        state,
        comments,
        comments_truncated,
    })
}

fn decode_comments(value: Option<&Value>) -> (Vec<ReviewComment>, bool) {
    let Some(edges) = value.and_then(|c| c.get("edges")).and_then(Value::as_array) else {
        return (Vec::new(), false);
    };
    let comments = edges
        .iter()
        .filter_map(|e| e.get("node"))
        .filter(|n| !n.is_null())
        .filter_map(|n| {
            let Some(body) = str_of(n, "body") else {
                debug!("skipping review comment without body");
                return None;
            };
            Some(ReviewComment {
                author: decode_actor(n.get("author")).ok().flatten(),
                body,
                diff_hunk: str_of(n, "diffHunk"),
                outdated: bool_of(n, "outdated"),
                state: n.get("state").and_then(Value::as_str).map(comment_state),
            })
        })
        .collect();
    // Independently capped nested pagination: equality at the cap means more
    // comments may exist upstream.
    (comments, edges.len() == COMMENT_PAGE_SIZE)
}

fn decode_commit(node: &Value) -> Result<Commit, DecodeError> {
    let commit = node
        .get("commit")
        .filter(|c| !c.is_null())
        .ok_or_else(|| DecodeError::malformed("PullRequestCommit", "missing commit", node))?;
    Ok(Commit {
        abbreviated_oid: required_str("PullRequestCommit", commit, "abbreviatedOid")?,
        message_headline: required_str("PullRequestCommit", commit, "messageHeadline")?,
        committed_date: commit
            .get("committedDate")
            .and_then(Value::as_str)
            .and_then(parse_timestamp),
        author: decode_git_actor(commit.get("author")),
        committer: decode_git_actor(commit.get("committer")),
        authored_by_committer: bool_of(commit, "authoredByCommitter"),
    })
}

fn review_state(s: &str) -> ReviewState {
    match s {
        "APPROVED" => ReviewState::Approved,
        "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
        "COMMENTED" => ReviewState::Commented,
        "DISMISSED" => ReviewState::Dismissed,
        "PENDING" => ReviewState::Pending,
        other => ReviewState::Other(other.to_string()),
    }
}

fn comment_state(s: &str) -> CommentState {
    match s {
        "PENDING" => CommentState::Pending,
        "SUBMITTED" => CommentState::Submitted,
        other => CommentState::Other(other.to_string()),
    }
}

fn lock_reason(s: &str) -> LockReason {
    match s {
        "OFF_TOPIC" => LockReason::OffTopic,
        "RESOLVED" => LockReason::Resolved,
        "SPAM" => LockReason::Spam,
        "TOO_HEATED" => LockReason::TooHeated,
        other => LockReason::Other(other.to_string()),
    }
}

fn label_of(type_name: &str, node: &Value) -> Result<LabelRef, DecodeError> {
    let name = node
        .get("label")
        .and_then(|l| l.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::malformed(type_name, "missing label name", node))?;
    Ok(LabelRef {
        name: name.to_string(),
    })
}

fn oid_of(value: Option<&Value>) -> Option<String> {
    value
        .filter(|v| !v.is_null())
        .and_then(|c| c.get("abbreviatedOid"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn str_of(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(Value::as_str).map(str::to_string)
}

fn required_str(type_name: &str, node: &Value, key: &str) -> Result<String, DecodeError> {
    str_of(node, key)
        .ok_or_else(|| DecodeError::malformed(type_name, format!("missing {key}"), node))
}

fn bool_of(node: &Value, key: &str) -> bool {
    node.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn timestamp_of(node: &Value) -> Option<Timestamp> {
    node.get("createdAt")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
}

fn parse_timestamp(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActorKind, Closer};
    use serde_json::json;

    #[test]
    fn labeled_event_round_trips_known_fields() {
        let node = json!({
            "__typename": "LabeledEvent",
            "id": "LE_1",
            "createdAt": "2025-03-01T12:00:00Z",
            "actor": {"__typename": "User", "login": "alice"},
            "label": {"name": "bug"}
        });
        let e = decode(&node);
        assert_eq!(e.id.as_deref(), Some("LE_1"));
        assert!(e.timestamp.is_some());
        assert_eq!(e.actor.as_ref().unwrap().login, "alice");
        match e.kind {
            EventKind::Labeled { label } => assert_eq!(label.name, "bug"),
            other => panic!("expected labeled, got {other:?}"),
        }
    }

    #[test]
    fn minimal_profile_node_has_no_envelope() {
        // Linkage query nodes carry only a type tag.
        let node = json!({"__typename": "ConnectedEvent"});
        let e = decode(&node);
        assert!(e.id.is_none());
        assert!(e.timestamp.is_none());
        assert!(e.actor.is_none());
        assert_eq!(e.kind, EventKind::Connected { source: None });
    }

    #[test]
    fn unrecognized_typename_becomes_unknown() {
        let node = json!({"__typename": "FutureEventType", "payload": {"x": 1}});
        let e = decode(&node);
        match &e.kind {
            EventKind::Unknown { type_name, raw } => {
                assert_eq!(type_name, "FutureEventType");
                assert_eq!(raw, &node);
            }
            other => panic!("expected unknown, got {other:?}"),
        }
    }

    #[test]
    fn malformed_known_node_downgrades_instead_of_failing() {
        // LabeledEvent without its label: a DecodeError internally, an
        // Unknown event externally, raw payload preserved.
        let node = json!({
            "__typename": "LabeledEvent",
            "actor": {"__typename": "User", "login": "alice"}
        });
        let e = decode(&node);
        assert!(e.is_unknown());
        match &e.kind {
            EventKind::Unknown { raw, .. } => assert_eq!(raw, &node),
            _ => unreachable!(),
        }
    }

    #[test]
    fn closed_event_without_closer_is_explicit_absence() {
        let node = json!({
            "__typename": "ClosedEvent",
            "actor": {"__typename": "User", "login": "alice"},
            "closer": null
        });
        match decode(&node).kind {
            EventKind::Closed { closer } => assert_eq!(closer, Closer::None),
            other => panic!("expected closed, got {other:?}"),
        }
    }

    #[test]
    fn review_with_capped_comment_list_is_flagged() {
        let edges: Vec<_> = (0..COMMENT_PAGE_SIZE)
            .map(|i| {
                json!({"node": {
                    "author": {"__typename": "User", "login": "bob"},
                    "body": format!("c{i}"),
                    "diffHunk": "@@ -1 +1 @@",
                    "outdated": false,
                    "state": "SUBMITTED"
                }})
            })
            .collect();
        let node = json!({
            "__typename": "PullRequestReview",
            "id": "R_1",
            "createdAt": "2025-03-02T08:00:00Z",
            "author": {"__typename": "User", "login": "bob"},
            "state": "CHANGES_REQUESTED",
            "body": "see notes",
            "comments": {"edges": edges}
        });
        match decode(&node).kind {
            EventKind::Review(review) => {
                assert_eq!(review.state, ReviewState::ChangesRequested);
                assert_eq!(review.comments.len(), COMMENT_PAGE_SIZE);
                assert!(review.comments_truncated);
                assert!(review.comments[0].state == Some(CommentState::Submitted));
            }
            other => panic!("expected review, got {other:?}"),
        }
    }

    #[test]
    fn commit_event_takes_time_and_actor_from_commit() {
        let node = json!({
            "__typename": "PullRequestCommit",
            "id": "PRC_1",
            "commit": {
                "abbreviatedOid": "abc1234",
                "messageHeadline": "Fix decoder",
                "committedDate": "2025-04-01T09:30:00Z",
                "authoredByCommitter": false,
                "author": {"name": "Alice", "user": {"login": "alice"}},
                "committer": {"name": "Bob", "user": {"login": "bob"}}
            }
        });
        let e = decode(&node);
        assert!(e.timestamp.is_some());
        assert_eq!(e.actor.as_ref().unwrap().login, "bob");
        assert_eq!(e.actor.as_ref().unwrap().kind, ActorKind::User);
        match e.kind {
            EventKind::Commit(c) => {
                assert_eq!(c.abbreviated_oid, "abc1234");
                assert!(!c.authored_by_committer);
                assert_eq!(c.author.unwrap().name.as_deref(), Some("Alice"));
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }
}
