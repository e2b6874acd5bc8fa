//! Orders decoded events and produces the final activity model plus
//! diagnostics, and offers the caller-level merge of two already-built
//! models (e.g. a PR timeline with the issue it closes).

use crate::model::{ActivityModel, SubjectKind, TimelineEvent, Timestamp};
use crate::page::DecodedPage;

/// Build the immutable activity model for one decoded page.
///
/// Dated events are ordered by timestamp ascending. Undated events are
/// anchored to their nearest dated predecessor in edge order (a run of
/// undated events before any dated one stays at the front), so they are
/// never resorted past a dated neighbor and keep their relative order
/// among themselves.
pub fn assemble(subject: SubjectKind, page: DecodedPage) -> ActivityModel {
    let unknown_variants = page.events.iter().filter(|e| e.is_unknown()).count();
    let events = flatten(sorted_blocks(into_blocks(page.events)));
    ActivityModel {
        subject,
        events,
        truncated: page.truncated,
        unknown_variants,
    }
}

/// Interleave two models' events by timestamp. Undated events from each side
/// stay immediately after their last dated predecessor from that same side;
/// undated prefixes come first, left side ahead on ties.
pub fn merge(a: &ActivityModel, b: &ActivityModel) -> Vec<TimelineEvent> {
    let mut left = into_blocks(a.events.clone()).into_iter().peekable();
    let mut right = into_blocks(b.events.clone()).into_iter().peekable();
    let mut out = Vec::with_capacity(a.events.len() + b.events.len());

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => block_key(l) <= block_key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let block = if take_left {
            left.next().unwrap()
        } else {
            right.next().unwrap()
        };
        out.extend(block);
    }
    out
}

// A block is one dated event followed by the undated events that trail it in
// edge order, or a leading run of undated events with no dated head.
fn into_blocks(events: Vec<TimelineEvent>) -> Vec<Vec<TimelineEvent>> {
    let mut blocks: Vec<Vec<TimelineEvent>> = Vec::new();
    for event in events {
        if event.timestamp.is_some() {
            blocks.push(vec![event]);
        } else {
            match blocks.last_mut() {
                Some(last) => last.push(event),
                None => blocks.push(vec![event]),
            }
        }
    }
    blocks
}

fn block_key(block: &[TimelineEvent]) -> Option<Timestamp> {
    // None (a headless undated prefix) orders before every timestamp.
    block.first().and_then(|e| e.timestamp)
}

fn sorted_blocks(mut blocks: Vec<Vec<TimelineEvent>>) -> Vec<Vec<TimelineEvent>> {
    blocks.sort_by_key(|b| block_key(b));
    blocks
}

fn flatten(blocks: Vec<Vec<TimelineEvent>>) -> Vec<TimelineEvent> {
    blocks.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventKind;
    use chrono::{TimeZone, Utc};

    fn ts(h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 5, 1, h, 0, 0).unwrap()
    }

    fn event(kind: EventKind, timestamp: Option<Timestamp>) -> TimelineEvent {
        TimelineEvent {
            id: None,
            timestamp,
            actor: None,
            kind,
        }
    }

    fn page(events: Vec<TimelineEvent>) -> DecodedPage {
        DecodedPage {
            events,
            truncated: false,
        }
    }

    #[test]
    fn dated_events_sort_by_timestamp() {
        let labeled = event(
            EventKind::Labeled {
                label: crate::model::LabelRef { name: "bug".into() },
            },
            Some(ts(10)),
        );
        let commented = event(EventKind::Commented { body: "hi".into() }, Some(ts(9)));
        let model = assemble(SubjectKind::Issue, page(vec![labeled, commented]));
        assert!(matches!(model.events[0].kind, EventKind::Commented { .. }));
        assert!(matches!(model.events[1].kind, EventKind::Labeled { .. }));
    }

    #[test]
    fn undated_event_keeps_its_edge_position() {
        let connected = event(EventKind::Connected { source: None }, None);
        let commented = event(EventKind::Commented { body: "hi".into() }, Some(ts(9)));
        let model = assemble(SubjectKind::Issue, page(vec![connected, commented]));
        // Stable placement: still immediately before the dated neighbor,
        // not resorted to the end.
        assert!(matches!(model.events[0].kind, EventKind::Connected { .. }));
        assert!(matches!(model.events[1].kind, EventKind::Commented { .. }));
    }

    #[test]
    fn all_undated_timeline_keeps_edge_order() {
        let events = vec![
            event(EventKind::Connected { source: None }, None),
            event(EventKind::Reopened, None),
            event(EventKind::Pinned, None),
        ];
        let model = assemble(SubjectKind::Issue, page(events.clone()));
        assert_eq!(model.events, events);
    }

    #[test]
    fn undated_trails_its_dated_predecessor_through_a_sort() {
        let events = vec![
            event(EventKind::Commented { body: "late".into() }, Some(ts(12))),
            event(EventKind::Connected { source: None }, None),
            event(EventKind::Commented { body: "early".into() }, Some(ts(8))),
        ];
        let model = assemble(SubjectKind::Issue, page(events));
        assert!(matches!(
            &model.events[0].kind,
            EventKind::Commented { body } if body == "early"
        ));
        assert!(matches!(
            &model.events[1].kind,
            EventKind::Commented { body } if body == "late"
        ));
        assert!(matches!(model.events[2].kind, EventKind::Connected { .. }));
    }

    #[test]
    fn unknown_variants_are_counted() {
        let events = vec![
            event(
                EventKind::Unknown {
                    type_name: "FutureEventType".into(),
                    raw: serde_json::json!({}),
                },
                None,
            ),
            event(EventKind::Reopened, Some(ts(1))),
        ];
        let model = assemble(SubjectKind::Issue, page(events));
        assert_eq!(model.unknown_variants, 1);
    }

    #[test]
    fn merge_interleaves_by_timestamp_and_anchors_undated() {
        let left = assemble(
            SubjectKind::PullRequest,
            page(vec![
                event(EventKind::Commented { body: "pr-1".into() }, Some(ts(1))),
                event(EventKind::Connected { source: None }, None),
                event(EventKind::Commented { body: "pr-2".into() }, Some(ts(5))),
            ]),
        );
        let right = assemble(
            SubjectKind::Issue,
            page(vec![
                event(EventKind::Commented { body: "is-1".into() }, Some(ts(3))),
            ]),
        );
        let merged = merge(&left, &right);
        let bodies: Vec<_> = merged
            .iter()
            .map(|e| match &e.kind {
                EventKind::Commented { body } => body.as_str(),
                EventKind::Connected { .. } => "connected",
                _ => "?",
            })
            .collect();
        // `connected` is undated on the left side, so it rides with pr-1,
        // never drifting past the interleaved issue comment.
        assert_eq!(bodies, vec!["pr-1", "connected", "is-1", "pr-2"]);
    }
}
