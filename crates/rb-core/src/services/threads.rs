use std::sync::Arc;

use chrono::Utc;
use futures_util::future::{try_join, try_join_all};

use super::require;
use crate::error::Result;
use crate::models::{NewThread, ThreadId, ThreadView, REPLY_PREVIEW_LIMIT, THREAD_PAGE_LIMIT};
use crate::moderation::{authorize, ModerationOutcome};
use crate::traits::BoardRepo;

/// Create, list, report, and delete threads.
#[derive(Clone)]
pub struct ThreadService {
    repo: Arc<dyn BoardRepo>,
}

impl ThreadService {
    pub fn new(repo: Arc<dyn BoardRepo>) -> Self {
        Self { repo }
    }

    pub async fn create_thread(&self, board: &str, text: &str, delete_password: &str) -> Result<ThreadId> {
        require("board", board)?;
        require("text", text)?;
        require("delete_password", delete_password)?;

        let id = self
            .repo
            .insert_thread(NewThread {
                board: board.to_string(),
                text: text.to_string(),
                delete_password: delete_password.to_string(),
                created_on: Utc::now(),
            })
            .await?;
        log::info!("thread {id} created on /{board}/");
        Ok(id)
    }

    /// The ten most recently bumped threads of `board`, each with its three
    /// newest replies.
    ///
    /// Reply look-ups fan out concurrently; the result keeps the listing order
    /// and the first failing look-up fails the whole call.
    pub async fn list_threads(&self, board: &str) -> Result<Vec<ThreadView>> {
        let threads = self.repo.list_threads(board, THREAD_PAGE_LIMIT).await?;

        let views = try_join_all(threads.into_iter().map(|thread| async move {
            let (replies, replycount) = try_join(
                self.repo.list_replies(thread.id, Some(REPLY_PREVIEW_LIMIT)),
                self.repo.count_replies(thread.id),
            )
            .await?;
            Ok::<_, anyhow::Error>(ThreadView::sanitize(thread, replies, replycount))
        }))
        .await?;

        Ok(views)
    }

    pub async fn report_thread(&self, thread_id: ThreadId) -> Result<ModerationOutcome> {
        if self.repo.get_thread(thread_id).await?.is_none() {
            return Ok(ModerationOutcome::ThreadNotFound);
        }
        self.repo.mark_thread_reported(thread_id).await?;
        log::info!("thread {thread_id} reported");
        Ok(ModerationOutcome::Reported)
    }

    /// Hard-deletes the thread when the password matches. Replies are left in place.
    pub async fn delete_thread(&self, thread_id: ThreadId, delete_password: &str) -> Result<ModerationOutcome> {
        let stored = self.repo.thread_password(thread_id).await?;
        if let Err(outcome) = authorize(stored.as_deref(), delete_password, ModerationOutcome::ThreadNotFound) {
            log::debug!("delete of thread {thread_id} refused: {outcome}");
            return Ok(outcome);
        }

        self.repo.delete_thread(thread_id).await?;
        log::info!("thread {thread_id} deleted");
        Ok(ModerationOutcome::Success)
    }
}
