//! The fixed GraphQL query documents this crate decodes responses of.
//!
//! All three are parameterized by `(owner, repo, number)`. None of them
//! requests `pageInfo`: the contract caps every timeline at 100 top-level
//! items and 100 items per nested comment collection, with no continuation
//! cursor. Decoding surfaces that cap as `truncated` / `comments_truncated`
//! instead of pretending the timeline is complete.

/// Top-level `timelineItems(first:)` cap shared by all three documents.
pub const TIMELINE_PAGE_SIZE: usize = 100;

/// Nested `comments(first:)` cap on reviews and review threads.
pub const COMMENT_PAGE_SIZE: usize = 100;

/// Minimal "linkage" profile: closure and cross-link detection only.
/// Deliberately requests no `createdAt` and no `id` on plain toggles.
pub const ISSUE_LINKAGE_QUERY: &str = r#"
query IssueLinkage($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      closed
      state
      stateReason
      title
      body
      timelineItems(first: 100) {
        edges {
          node {
            __typename
            ... on ClosedEvent {
              actor { __typename login }
              closer {
                __typename
                ... on PullRequest { number title }
                ... on Commit { abbreviatedOid }
              }
            }
            ... on CrossReferencedEvent {
              isCrossRepository
              source {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on IssueComment {
              author { __typename login }
              body
            }
            ... on LabeledEvent {
              actor { __typename login }
              label { name }
            }
          }
        }
      }
    }
  }
}
"#;

/// Full pull-request timeline profile.
pub const PULL_REQUEST_TIMELINE_QUERY: &str = r#"
query PullRequestTimeline($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      timelineItems(first: 100) {
        edges {
          node {
            __typename
            ... on AssignedEvent {
              id
              createdAt
              actor { __typename login }
              assignee {
                __typename
                ... on Bot { login }
                ... on Mannequin { login }
                ... on Organization { login }
                ... on User { login }
              }
            }
            ... on UnassignedEvent {
              id
              createdAt
              actor { __typename login }
              assignee {
                __typename
                ... on Bot { login }
                ... on Mannequin { login }
                ... on Organization { login }
                ... on User { login }
              }
            }
            ... on LabeledEvent {
              id
              createdAt
              actor { __typename login }
              label { name }
            }
            ... on UnlabeledEvent {
              id
              createdAt
              actor { __typename login }
              label { name }
            }
            ... on ClosedEvent {
              id
              createdAt
              actor { __typename login }
              closer {
                __typename
                ... on PullRequest { number title repository { name owner { login } } }
                ... on Commit { abbreviatedOid repository { name owner { login } } }
              }
            }
            ... on ReopenedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on ConnectedEvent {
              id
              createdAt
              actor { __typename login }
              source {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on CrossReferencedEvent {
              id
              createdAt
              actor { __typename login }
              isCrossRepository
              source {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on ReferencedEvent {
              id
              createdAt
              actor { __typename login }
              isCrossRepository
              commit { abbreviatedOid messageHeadline }
              commitRepository { name owner { login } }
            }
            ... on IssueComment {
              id
              createdAt
              author { __typename login }
              body
            }
            ... on PullRequestReview {
              id
              createdAt
              author { __typename login }
              state
              body
              comments(first: 100) {
                edges {
                  node {
                    author { __typename login }
                    body
                    diffHunk
                    outdated
                    state
                  }
                }
              }
            }
            ... on PullRequestReviewThread {
              id
              comments(first: 100) {
                edges {
                  node {
                    author { __typename login }
                    body
                    diffHunk
                    outdated
                    state
                  }
                }
              }
            }
            ... on PullRequestCommit {
              id
              commit {
                abbreviatedOid
                messageHeadline
                committedDate
                authoredByCommitter
                author { name user { login } }
                committer { name user { login } }
              }
            }
            ... on MergedEvent {
              id
              createdAt
              actor { __typename login }
              mergeRefName
            }
            ... on LockedEvent {
              id
              createdAt
              actor { __typename login }
              lockReason
            }
            ... on UnlockedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on PinnedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on UnpinnedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on MilestonedEvent {
              id
              createdAt
              actor { __typename login }
              milestoneTitle
            }
            ... on DemilestonedEvent {
              id
              createdAt
              actor { __typename login }
              milestoneTitle
            }
            ... on MarkedAsDuplicateEvent {
              id
              createdAt
              actor { __typename login }
              canonical {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on UnmarkedAsDuplicateEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on RenamedTitleEvent {
              id
              createdAt
              actor { __typename login }
              previousTitle
              currentTitle
            }
            ... on ConvertedToDiscussionEvent {
              id
              createdAt
              actor { __typename login }
              discussion { number title }
            }
            ... on HeadRefForcePushedEvent {
              id
              createdAt
              actor { __typename login }
              beforeCommit { abbreviatedOid }
              afterCommit { abbreviatedOid }
            }
            ... on HeadRefDeletedEvent {
              id
              createdAt
              actor { __typename login }
              headRefName
            }
            ... on ReviewRequestedEvent {
              id
              createdAt
              actor { __typename login }
              requestedReviewer {
                __typename
                ... on Mannequin { login }
                ... on Team { name }
                ... on User { login }
              }
            }
            ... on ReviewRequestRemovedEvent {
              id
              createdAt
              actor { __typename login }
              requestedReviewer {
                __typename
                ... on Mannequin { login }
                ... on Team { name }
                ... on User { login }
              }
            }
            ... on ConvertToDraftEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on ReadyForReviewEvent {
              id
              createdAt
              actor { __typename login }
            }
          }
        }
      }
    }
  }
}
"#;

/// Full issue timeline profile: same shape as the PR document, scoped to the
/// event types an issue can have (no commit/review/merge events).
pub const ISSUE_TIMELINE_QUERY: &str = r#"
query IssueTimeline($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      timelineItems(first: 100) {
        edges {
          node {
            __typename
            ... on AssignedEvent {
              id
              createdAt
              actor { __typename login }
              assignee {
                __typename
                ... on Bot { login }
                ... on Mannequin { login }
                ... on Organization { login }
                ... on User { login }
              }
            }
            ... on UnassignedEvent {
              id
              createdAt
              actor { __typename login }
              assignee {
                __typename
                ... on Bot { login }
                ... on Mannequin { login }
                ... on Organization { login }
                ... on User { login }
              }
            }
            ... on LabeledEvent {
              id
              createdAt
              actor { __typename login }
              label { name }
            }
            ... on UnlabeledEvent {
              id
              createdAt
              actor { __typename login }
              label { name }
            }
            ... on ClosedEvent {
              id
              createdAt
              actor { __typename login }
              closer {
                __typename
                ... on PullRequest { number title repository { name owner { login } } }
                ... on Commit { abbreviatedOid repository { name owner { login } } }
              }
            }
            ... on ReopenedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on ConnectedEvent {
              id
              createdAt
              actor { __typename login }
              source {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on CrossReferencedEvent {
              id
              createdAt
              actor { __typename login }
              isCrossRepository
              source {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on ReferencedEvent {
              id
              createdAt
              actor { __typename login }
              isCrossRepository
              commit { abbreviatedOid messageHeadline }
              commitRepository { name owner { login } }
            }
            ... on IssueComment {
              id
              createdAt
              author { __typename login }
              body
            }
            ... on LockedEvent {
              id
              createdAt
              actor { __typename login }
              lockReason
            }
            ... on UnlockedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on PinnedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on UnpinnedEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on MilestonedEvent {
              id
              createdAt
              actor { __typename login }
              milestoneTitle
            }
            ... on DemilestonedEvent {
              id
              createdAt
              actor { __typename login }
              milestoneTitle
            }
            ... on MarkedAsDuplicateEvent {
              id
              createdAt
              actor { __typename login }
              canonical {
                __typename
                ... on Issue { number title repository { name owner { login } } }
                ... on PullRequest { number title repository { name owner { login } } }
              }
            }
            ... on UnmarkedAsDuplicateEvent {
              id
              createdAt
              actor { __typename login }
            }
            ... on RenamedTitleEvent {
              id
              createdAt
              actor { __typename login }
              previousTitle
              currentTitle
            }
            ... on ConvertedToDiscussionEvent {
              id
              createdAt
              actor { __typename login }
              discussion { number title }
            }
          }
        }
      }
    }
  }
}
"#;
