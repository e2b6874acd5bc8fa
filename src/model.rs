use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

pub type Timestamp = DateTime<Utc>;

/// What kind of resource a timeline belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Issue,
    PullRequest,
}

/// Concrete type behind an actor-like union (`actor`, `assignee`,
/// `requestedReviewer`, `committer.user`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    User,
    Organization,
    Mannequin,
    Bot,
    Team,
    /// Discriminator present but not in the known set.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorRef {
    pub kind: ActorKind,
    pub login: String,
}

impl ActorRef {
    pub fn user(login: impl Into<String>) -> Self {
        Self {
            kind: ActorKind::User,
            login: login.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Issue,
    PullRequest,
    Discussion,
    Commit,
}

/// Weak reference to another issue/PR/discussion/commit. Never hydrated;
/// `title` and `number` are whatever the API inlined at response time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub is_cross_repository: bool,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            owner: None,
            repo: None,
            number: None,
            oid: None,
            title: None,
            is_cross_repository: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelRef {
    pub name: String,
}

/// What closed an issue or pull request.
///
/// `None` (the field was null in the response: closed administratively) is
/// deliberately distinct from `Unrecognized` (a closer was present but of a
/// shape this consumer does not know).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Closer {
    None,
    Resource(ResourceRef),
    Unrecognized { raw: Value },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentState {
    Pending,
    Submitted,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockReason {
    OffTopic,
    Resolved,
    Spam,
    TooHeated,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewComment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ActorRef>,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_hunk: Option<String>,
    pub outdated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<CommentState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<ActorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub state: ReviewState,
    pub comments: Vec<ReviewComment>,
    /// The nested comment collection hit its 100-item cap; more comments may
    /// exist upstream.
    pub comments_truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewThread {
    pub comments: Vec<ReviewComment>,
    pub comments_truncated: bool,
}

/// A git identity with an optional link to a platform account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitActorRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ActorRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub abbreviated_oid: String,
    pub message_headline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<GitActorRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committer: Option<GitActorRef>,
    pub authored_by_committer: bool,
}

/// One normalized timeline event. Exactly one variant per raw node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    Assigned {
        assignee: Option<ActorRef>,
    },
    Unassigned {
        assignee: Option<ActorRef>,
    },
    Labeled {
        label: LabelRef,
    },
    Unlabeled {
        label: LabelRef,
    },
    Closed {
        closer: Closer,
    },
    Reopened,
    Connected {
        source: Option<ResourceRef>,
    },
    CrossReferenced {
        source: Option<ResourceRef>,
    },
    Referenced {
        /// The referencing commit as a weak reference; `title` carries the
        /// commit message headline.
        commit: Option<ResourceRef>,
    },
    Commented {
        body: String,
    },
    Review(Review),
    ReviewThread(ReviewThread),
    Commit(Commit),
    Merged {
        merge_ref_name: Option<String>,
    },
    Locked {
        reason: Option<LockReason>,
    },
    Unlocked,
    Pinned,
    Unpinned,
    Milestoned {
        title: String,
    },
    Demilestoned {
        title: String,
    },
    MarkedDuplicate {
        canonical: Option<ResourceRef>,
    },
    UnmarkedDuplicate,
    RenamedTitle {
        previous: String,
        current: String,
    },
    ConvertedToDiscussion {
        discussion: Option<ResourceRef>,
    },
    ForcePushed {
        before: Option<String>,
        after: Option<String>,
    },
    HeadDeleted {
        ref_name: String,
    },
    ReviewRequested {
        reviewer: Option<ActorRef>,
    },
    ReviewRequestRemoved {
        reviewer: Option<ActorRef>,
    },
    ConvertedToDraft,
    ReadyForReview,
    /// Forward-compatibility arm: the raw node is preserved verbatim so no
    /// information is lost even though it is not structurally typed.
    Unknown {
        type_name: String,
        raw: Value,
    },
}

/// Common envelope around every event variant.
///
/// `timestamp` and `id` are genuinely optional: the minimal linkage query
/// profile requests neither, and some variants carry only a type tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorRef>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimelineEvent {
    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, EventKind::Unknown { .. })
    }
}

/// The uniform activity model produced from one response page.
/// Constructed once per response and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityModel {
    pub subject: SubjectKind,
    pub events: Vec<TimelineEvent>,
    /// Edge count hit the 100-item page cap. A heuristic: the contract
    /// requests no continuation cursor, so equality at the cap is the
    /// strongest available signal that the timeline is incomplete.
    pub truncated: bool,
    pub unknown_variants: usize,
}

/// Minimal-profile issue view: subject fields plus the linkage timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueLinkage {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub closed: bool,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_reason: Option<String>,
    pub timeline: ActivityModel,
}
