//! Walks the edges of a single response page, decodes each node in order,
//! and records truncation status. No pagination loop exists in the wire
//! contract, so one page is all there ever is.

use log::warn;
use serde_json::Value;

use crate::error::DecodeError;
use crate::event;
use crate::model::{SubjectKind, TimelineEvent};
use crate::queries::TIMELINE_PAGE_SIZE;

#[derive(Debug, Clone)]
pub struct DecodedPage {
    pub events: Vec<TimelineEvent>,
    pub truncated: bool,
}

/// Decode a `timelineItems` container. Event order in the output equals edge
/// order in the response. A container that is not a well-formed list of
/// edges is the only fatal decode error; individual bad nodes degrade inside
/// the event decoder instead.
pub fn extract(timeline_items: &Value) -> Result<DecodedPage, DecodeError> {
    let edges = timeline_items
        .get("edges")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            DecodeError::MalformedPage("timelineItems.edges is not an array".to_string())
        })?;

    let truncated = edges.len() == TIMELINE_PAGE_SIZE;
    if truncated {
        warn!(
            "timeline page hit the {}-item cap; older activity may be missing",
            TIMELINE_PAGE_SIZE
        );
    }

    let events = edges
        .iter()
        .filter_map(|edge| edge.get("node"))
        .filter(|node| !node.is_null())
        .map(event::decode)
        .collect();

    Ok(DecodedPage { events, truncated })
}

/// Locate the subject node (`issue` or `pullRequest`) inside a GraphQL
/// `data` payload. `None` means the repository or subject does not exist.
pub fn subject_node(data: &Value, subject: SubjectKind) -> Option<&Value> {
    let field = match subject {
        SubjectKind::Issue => "issue",
        SubjectKind::PullRequest => "pullRequest",
    };
    data.get("repository")
        .filter(|r| !r.is_null())?
        .get(field)
        .filter(|s| !s.is_null())
}

/// Pull the `timelineItems` container out of a subject node.
pub fn timeline_items(subject: &Value) -> Result<&Value, DecodeError> {
    subject
        .get("timelineItems")
        .filter(|t| !t.is_null())
        .ok_or_else(|| DecodeError::MalformedPage("subject has no timelineItems".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_of(n: usize) -> Value {
        let edges: Vec<_> = (0..n)
            .map(|i| {
                json!({"node": {
                    "__typename": "IssueComment",
                    "id": format!("IC_{i}"),
                    "createdAt": "2025-01-01T00:00:00Z",
                    "author": {"__typename": "User", "login": "alice"},
                    "body": format!("comment {i}")
                }})
            })
            .collect();
        json!({ "edges": edges })
    }

    #[test]
    fn edge_order_is_preserved() {
        let page = extract(&page_of(3)).unwrap();
        let ids: Vec<_> = page.events.iter().map(|e| e.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["IC_0", "IC_1", "IC_2"]);
    }

    #[test]
    fn truncation_heuristic_at_exact_cap() {
        assert!(extract(&page_of(TIMELINE_PAGE_SIZE)).unwrap().truncated);
        assert!(!extract(&page_of(TIMELINE_PAGE_SIZE - 1)).unwrap().truncated);
    }

    #[test]
    fn null_edges_and_nodes_are_skipped() {
        let items = json!({"edges": [
            null,
            {"node": null},
            {"node": {"__typename": "ReopenedEvent"}}
        ]});
        let page = extract(&items).unwrap();
        assert_eq!(page.events.len(), 1);
    }

    #[test]
    fn malformed_container_is_fatal() {
        let items = json!({"edges": "nope"});
        assert!(matches!(
            extract(&items),
            Err(DecodeError::MalformedPage(_))
        ));
        let items = json!({});
        assert!(extract(&items).is_err());
    }

    #[test]
    fn subject_node_descent() {
        let data = json!({"repository": {"issue": {"timelineItems": {"edges": []}}}});
        let subject = subject_node(&data, SubjectKind::Issue).unwrap();
        assert!(timeline_items(subject).is_ok());
        assert!(subject_node(&data, SubjectKind::PullRequest).is_none());

        let missing = json!({"repository": null});
        assert!(subject_node(&missing, SubjectKind::Issue).is_none());
    }
}
