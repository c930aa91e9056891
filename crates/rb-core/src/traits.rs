//! # Core Traits (Ports)
//!
//! Any storage plugin must implement [`BoardRepo`] to be used by the binary.

use async_trait::async_trait;

use crate::models::{NewReply, NewThread, Reply, ReplyId, Thread, ThreadId};

/// Data persistence contract for the `thread` and `replies` collections.
///
/// Reply lookups are always scoped by `thread_id`; a reply belonging to another
/// thread is reported as absent. Nothing here cascades from threads to replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardRepo: Send + Sync {
    // Thread Operations
    async fn insert_thread(&self, thread: NewThread) -> anyhow::Result<ThreadId>;
    /// Threads of `board`, most recently bumped first.
    async fn list_threads(&self, board: &str, limit: i64) -> anyhow::Result<Vec<Thread>>;
    async fn get_thread(&self, id: ThreadId) -> anyhow::Result<Option<Thread>>;
    async fn thread_password(&self, id: ThreadId) -> anyhow::Result<Option<String>>;
    async fn mark_thread_reported(&self, id: ThreadId) -> anyhow::Result<()>;
    /// Removes the thread row only. Its replies stay behind.
    async fn delete_thread(&self, id: ThreadId) -> anyhow::Result<()>;

    // Reply Operations
    /// Inserts the reply and bumps the parent thread to `reply.created_on`.
    /// The parent is not required to exist.
    async fn insert_reply(&self, reply: NewReply) -> anyhow::Result<ReplyId>;
    /// Replies of a thread, newest first; `None` means no limit.
    async fn list_replies(&self, thread_id: ThreadId, limit: Option<i64>) -> anyhow::Result<Vec<Reply>>;
    async fn count_replies(&self, thread_id: ThreadId) -> anyhow::Result<i64>;
    async fn get_reply(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<Option<Reply>>;
    async fn reply_password(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<Option<String>>;
    async fn mark_reply_reported(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<()>;
    async fn set_reply_text(&self, thread_id: ThreadId, reply_id: ReplyId, text: &str) -> anyhow::Result<()>;
}
