//! # Domain Models
//!
//! Rows as the storage layer holds them (`Thread`, `Reply`) and the sanitized
//! views that are allowed to leave the system (`ThreadView`, `ReplyView`).
//! Identifiers are store-assigned integers that are never reused.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub type ThreadId = i64;
pub type ReplyId = i64;

/// Text written over a reply when its author deletes it.
pub const REDACTED_TEXT: &str = "[deleted]";

/// Threads shown on a board listing.
pub const THREAD_PAGE_LIMIT: i64 = 10;

/// Replies previewed under each thread of a board listing.
pub const REPLY_PREVIEW_LIMIT: i64 = 3;

/// A discussion thread on a board, including its private moderation fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    /// Last activity; drives the order of the board listing.
    pub bumped_on: DateTime<Utc>,
    pub reported: bool,
}

/// A reply inside a thread. Deleting a reply redacts `text`, the row stays.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
    pub reported: bool,
}

/// Insert payload for a thread; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewThread {
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
}

/// Insert payload for a reply. `created_on` doubles as the bump time of the parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReply {
    pub thread_id: ThreadId,
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub created_on: DateTime<Utc>,
}

/// Public projection of a [`Reply`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyView {
    #[serde(rename = "_id")]
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

/// Public projection of a [`Thread`] with the replies attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadView {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
    /// Total replies stored for the thread, not just the attached ones.
    pub replycount: i64,
}

impl From<Reply> for ReplyView {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            board: reply.board,
            text: reply.text,
            created_on: reply.created_on,
        }
    }
}

impl ThreadView {
    /// Drops the private fields of `thread` and of every reply.
    pub fn sanitize(thread: Thread, replies: Vec<Reply>, replycount: i64) -> Self {
        Self {
            id: thread.id,
            board: thread.board,
            text: thread.text,
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: replies.into_iter().map(ReplyView::from).collect(),
            replycount,
        }
    }
}
