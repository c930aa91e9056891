use std::sync::Arc;

use chrono::Utc;
use futures_util::future::try_join;

use super::require;
use crate::error::Result;
use crate::models::{NewReply, ReplyId, ThreadId, ThreadView, REDACTED_TEXT};
use crate::moderation::{authorize, ModerationOutcome};
use crate::traits::BoardRepo;

/// Create, read, report, and redact replies.
#[derive(Clone)]
pub struct ReplyService {
    repo: Arc<dyn BoardRepo>,
}

impl ReplyService {
    pub fn new(repo: Arc<dyn BoardRepo>) -> Self {
        Self { repo }
    }

    /// Adds a reply and bumps its thread. The thread is not checked for
    /// existence, so a reply to a missing thread is stored as an orphan.
    pub async fn create_reply(
        &self,
        board: &str,
        thread_id: ThreadId,
        text: &str,
        delete_password: &str,
    ) -> Result<ReplyId> {
        require("text", text)?;
        require("delete_password", delete_password)?;

        let id = self
            .repo
            .insert_reply(NewReply {
                thread_id,
                board: board.to_string(),
                text: text.to_string(),
                delete_password: delete_password.to_string(),
                created_on: Utc::now(),
            })
            .await?;
        log::info!("reply {id} added to thread {thread_id}");
        Ok(id)
    }

    /// A thread with every one of its replies, newest first. `None` if the
    /// thread does not exist.
    pub async fn get_thread_with_replies(&self, thread_id: ThreadId) -> Result<Option<ThreadView>> {
        let Some(thread) = self.repo.get_thread(thread_id).await? else {
            return Ok(None);
        };

        let (replies, replycount) = try_join(
            self.repo.list_replies(thread_id, None),
            self.repo.count_replies(thread_id),
        )
        .await?;
        Ok(Some(ThreadView::sanitize(thread, replies, replycount)))
    }

    pub async fn report_reply(&self, thread_id: ThreadId, reply_id: ReplyId) -> Result<ModerationOutcome> {
        if self.repo.get_reply(thread_id, reply_id).await?.is_none() {
            return Ok(ModerationOutcome::ReplyNotFound);
        }
        self.repo.mark_reply_reported(thread_id, reply_id).await?;
        log::info!("reply {reply_id} in thread {thread_id} reported");
        Ok(ModerationOutcome::Reported)
    }

    /// Overwrites the reply text with [`REDACTED_TEXT`]. Id, timestamps, and
    /// the reported flag are kept.
    pub async fn redact_reply(
        &self,
        thread_id: ThreadId,
        reply_id: ReplyId,
        delete_password: &str,
    ) -> Result<ModerationOutcome> {
        let stored = self.repo.reply_password(thread_id, reply_id).await?;
        if let Err(outcome) = authorize(stored.as_deref(), delete_password, ModerationOutcome::ReplyNotFound) {
            log::debug!("redact of reply {reply_id} refused: {outcome}");
            return Ok(outcome);
        }

        self.repo.set_reply_text(thread_id, reply_id, REDACTED_TEXT).await?;
        log::info!("reply {reply_id} in thread {thread_id} redacted");
        Ok(ModerationOutcome::Success)
    }
}
