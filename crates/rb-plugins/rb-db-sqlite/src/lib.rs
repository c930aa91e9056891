//! # rb-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite `thread` and
//! `replies` tables and the `rb-core` domain models.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use rb_core::models::{NewReply, NewThread, Reply, ReplyId, Thread, ThreadId};
use rb_core::traits::BoardRepo;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

/// `replies.thread_id` has no REFERENCES clause: replies may point at threads
/// that were never created or have since been deleted.
const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS thread (
        _id INTEGER PRIMARY KEY AUTOINCREMENT,
        board TEXT NOT NULL,
        text TEXT NOT NULL,
        delete_password TEXT NOT NULL,
        created_on TEXT NOT NULL,
        bumped_on TEXT NOT NULL,
        reported BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_thread_board_bumped ON thread (board, bumped_on DESC)",
    r#"
    CREATE TABLE IF NOT EXISTS replies (
        _id INTEGER PRIMARY KEY AUTOINCREMENT,
        thread_id INTEGER NOT NULL,
        board TEXT NOT NULL,
        text TEXT NOT NULL,
        delete_password TEXT NOT NULL,
        created_on TEXT NOT NULL,
        reported BOOLEAN NOT NULL DEFAULT 0
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_replies_thread_created ON replies (thread_id, created_on DESC)",
];

pub struct SqliteBoardRepo {
    pool: SqlitePool,
}

impl SqliteBoardRepo {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid database url {url}"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    /// A private in-memory database. Pinned to one connection that is never
    /// recycled, since each SQLite memory connection is its own database.
    pub async fn in_memory() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.migrate().await?;
        Ok(repo)
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .context("failed to apply message board schema")?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("database pool closed");
    }
}

fn map_thread(row: &SqliteRow) -> sqlx::Result<Thread> {
    Ok(Thread {
        id: row.try_get("_id")?,
        board: row.try_get("board")?,
        text: row.try_get("text")?,
        delete_password: row.try_get("delete_password")?,
        created_on: row.try_get("created_on")?,
        bumped_on: row.try_get("bumped_on")?,
        reported: row.try_get("reported")?,
    })
}

fn map_reply(row: &SqliteRow) -> sqlx::Result<Reply> {
    Ok(Reply {
        id: row.try_get("_id")?,
        thread_id: row.try_get("thread_id")?,
        board: row.try_get("board")?,
        text: row.try_get("text")?,
        delete_password: row.try_get("delete_password")?,
        created_on: row.try_get("created_on")?,
        reported: row.try_get("reported")?,
    })
}

#[async_trait]
impl BoardRepo for SqliteBoardRepo {
    async fn insert_thread(&self, thread: NewThread) -> anyhow::Result<ThreadId> {
        let id = sqlx::query(
            "INSERT INTO thread (board, text, delete_password, created_on, bumped_on) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(thread.board)
        .bind(thread.text)
        .bind(thread.delete_password)
        .bind(thread.created_on)
        .bind(thread.created_on)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    /// Ties on `bumped_on` fall back to the newer id.
    async fn list_threads(&self, board: &str, limit: i64) -> anyhow::Result<Vec<Thread>> {
        let rows = sqlx::query("SELECT * FROM thread WHERE board = ? ORDER BY bumped_on DESC, _id DESC LIMIT ?")
            .bind(board)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_thread).collect::<sqlx::Result<_>>()?)
    }

    async fn get_thread(&self, id: ThreadId) -> anyhow::Result<Option<Thread>> {
        let row = sqlx::query("SELECT * FROM thread WHERE _id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_thread).transpose()?)
    }

    async fn thread_password(&self, id: ThreadId) -> anyhow::Result<Option<String>> {
        let password = sqlx::query_scalar::<_, String>("SELECT delete_password FROM thread WHERE _id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(password)
    }

    async fn mark_thread_reported(&self, id: ThreadId) -> anyhow::Result<()> {
        sqlx::query("UPDATE thread SET reported = 1 WHERE _id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_thread(&self, id: ThreadId) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM thread WHERE _id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Insert and bump commit together. `bumped_on` never moves backwards;
    /// an orphan `thread_id` bumps nothing.
    async fn insert_reply(&self, reply: NewReply) -> anyhow::Result<ReplyId> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            "INSERT INTO replies (thread_id, board, text, delete_password, created_on) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(reply.thread_id)
        .bind(reply.board)
        .bind(reply.text)
        .bind(reply.delete_password)
        .bind(reply.created_on)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let bumped = sqlx::query("UPDATE thread SET bumped_on = MAX(bumped_on, ?) WHERE _id = ?")
            .bind(reply.created_on)
            .bind(reply.thread_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if bumped == 0 {
            log::warn!("reply {id} stored for missing thread {}", reply.thread_id);
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn list_replies(&self, thread_id: ThreadId, limit: Option<i64>) -> anyhow::Result<Vec<Reply>> {
        // SQLite reads a negative LIMIT as "no limit".
        let rows = sqlx::query("SELECT * FROM replies WHERE thread_id = ? ORDER BY created_on DESC, _id DESC LIMIT ?")
            .bind(thread_id)
            .bind(limit.unwrap_or(-1))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_reply).collect::<sqlx::Result<_>>()?)
    }

    async fn count_replies(&self, thread_id: ThreadId) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM replies WHERE thread_id = ?")
            .bind(thread_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn get_reply(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<Option<Reply>> {
        let row = sqlx::query("SELECT * FROM replies WHERE _id = ? AND thread_id = ?")
            .bind(reply_id)
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_reply).transpose()?)
    }

    async fn reply_password(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<Option<String>> {
        let password = sqlx::query_scalar::<_, String>("SELECT delete_password FROM replies WHERE _id = ? AND thread_id = ?")
            .bind(reply_id)
            .bind(thread_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(password)
    }

    async fn mark_reply_reported(&self, thread_id: ThreadId, reply_id: ReplyId) -> anyhow::Result<()> {
        sqlx::query("UPDATE replies SET reported = 1 WHERE _id = ? AND thread_id = ?")
            .bind(reply_id)
            .bind(thread_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_reply_text(&self, thread_id: ThreadId, reply_id: ReplyId, text: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE replies SET text = ? WHERE _id = ? AND thread_id = ?")
            .bind(text)
            .bind(reply_id)
            .bind(thread_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    async fn thread_at(repo: &SqliteBoardRepo, board: &str, minutes: i64) -> ThreadId {
        repo.insert_thread(NewThread {
            board: board.into(),
            text: format!("{board} at {minutes}"),
            delete_password: "1234".into(),
            created_on: at(minutes),
        })
        .await
        .unwrap()
    }

    async fn reply_at(repo: &SqliteBoardRepo, thread_id: ThreadId, minutes: i64) -> ReplyId {
        repo.insert_reply(NewReply {
            thread_id,
            board: "test".into(),
            text: format!("reply at {minutes}"),
            delete_password: "pw".into(),
            created_on: at(minutes),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_thread() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 0).await;

        let thread = repo.get_thread(id).await.unwrap().expect("thread should exist");
        assert_eq!(thread.board, "test");
        assert_eq!(thread.created_on, at(0));
        assert_eq!(thread.bumped_on, at(0));
        assert!(!thread.reported);
        assert_eq!(repo.thread_password(id).await.unwrap().as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let first = thread_at(&repo, "test", 0).await;
        repo.delete_thread(first).await.unwrap();

        let second = thread_at(&repo, "test", 1).await;
        assert!(second > first);
    }

    #[tokio::test]
    async fn listing_is_board_scoped_bounded_and_bump_ordered() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        for minutes in 0..12 {
            thread_at(&repo, "test", minutes).await;
        }
        thread_at(&repo, "other", 100).await;

        let threads = repo.list_threads("test", 10).await.unwrap();
        assert_eq!(threads.len(), 10);
        assert!(threads.iter().all(|t| t.board == "test"));
        assert!(threads.windows(2).all(|w| w[0].bumped_on >= w[1].bumped_on));
        assert_eq!(threads[0].bumped_on, at(11));
    }

    #[tokio::test]
    async fn reply_bumps_thread_to_the_top() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let old = thread_at(&repo, "test", 0).await;
        thread_at(&repo, "test", 5).await;

        reply_at(&repo, old, 10).await;

        let threads = repo.list_threads("test", 10).await.unwrap();
        assert_eq!(threads[0].id, old);
        assert_eq!(threads[0].bumped_on, at(10));
        assert_eq!(threads[0].created_on, at(0));
    }

    #[tokio::test]
    async fn bump_never_moves_backwards() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 30).await;

        reply_at(&repo, id, 10).await;

        let thread = repo.get_thread(id).await.unwrap().unwrap();
        assert_eq!(thread.bumped_on, at(30));
    }

    #[tokio::test]
    async fn reply_listing_is_newest_first_and_optionally_bounded() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 0).await;
        for minutes in 1..=5 {
            reply_at(&repo, id, minutes).await;
        }

        let preview = repo.list_replies(id, Some(3)).await.unwrap();
        assert_eq!(preview.iter().map(|r| r.created_on).collect::<Vec<_>>(), vec![at(5), at(4), at(3)]);

        let all = repo.list_replies(id, None).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(repo.count_replies(id).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn orphan_reply_is_stored() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();

        let reply_id = reply_at(&repo, 404, 0).await;

        let reply = repo.get_reply(404, reply_id).await.unwrap();
        assert!(reply.is_some());
    }

    #[tokio::test]
    async fn deleting_a_thread_leaves_its_replies() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 0).await;
        reply_at(&repo, id, 1).await;

        repo.delete_thread(id).await.unwrap();

        assert!(repo.get_thread(id).await.unwrap().is_none());
        assert_eq!(repo.list_replies(id, None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reply_lookups_are_scoped_by_thread() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let a = thread_at(&repo, "test", 0).await;
        let b = thread_at(&repo, "test", 1).await;
        let reply_id = reply_at(&repo, a, 2).await;

        assert!(repo.get_reply(b, reply_id).await.unwrap().is_none());
        assert!(repo.reply_password(b, reply_id).await.unwrap().is_none());

        repo.set_reply_text(b, reply_id, "[deleted]").await.unwrap();
        let reply = repo.get_reply(a, reply_id).await.unwrap().unwrap();
        assert_eq!(reply.text, "reply at 2");
    }

    #[tokio::test]
    async fn redaction_keeps_metadata() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 0).await;
        let reply_id = reply_at(&repo, id, 1).await;
        repo.mark_reply_reported(id, reply_id).await.unwrap();
        let before = repo.get_reply(id, reply_id).await.unwrap().unwrap();

        repo.set_reply_text(id, reply_id, "[deleted]").await.unwrap();

        let after = repo.get_reply(id, reply_id).await.unwrap().unwrap();
        assert_eq!(after.text, "[deleted]");
        assert_eq!(after.id, before.id);
        assert_eq!(after.thread_id, before.thread_id);
        assert_eq!(after.created_on, before.created_on);
        assert!(after.reported);
    }

    #[tokio::test]
    async fn report_sets_flag() {
        let repo = SqliteBoardRepo::in_memory().await.unwrap();
        let id = thread_at(&repo, "test", 0).await;

        repo.mark_thread_reported(id).await.unwrap();

        assert!(repo.get_thread(id).await.unwrap().unwrap().reported);
    }
}
