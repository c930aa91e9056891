//! rusty-board/crates/rb-core/src/lib.rs
//!
//! The thread/reply lifecycle, the moderation rules around it, and the
//! storage port every database plugin implements.

pub mod models;
pub mod traits;
pub mod error;
pub mod moderation;
pub mod services;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use moderation::*;
pub use services::{ReplyService, ThreadService};


#[cfg(test)]
mod tests {
    use super::models::*;
    use chrono::Utc;

    #[test]
    fn sanitized_thread_hides_private_fields() {
        let now = Utc::now();
        let thread = Thread {
            id: 1,
            board: "test".to_string(),
            text: "hi".to_string(),
            delete_password: "1234".to_string(),
            created_on: now,
            bumped_on: now,
            reported: true,
        };
        let reply = Reply {
            id: 2,
            thread_id: 1,
            board: "test".to_string(),
            text: "yo".to_string(),
            delete_password: "5678".to_string(),
            created_on: now,
            reported: true,
        };

        let json = serde_json::to_value(ThreadView::sanitize(thread, vec![reply], 1)).unwrap();

        assert_eq!(json["_id"], 1);
        assert_eq!(json["replycount"], 1);
        assert_eq!(json["replies"][0]["thread_id"], 1);
        for object in [&json, &json["replies"][0]] {
            let object = object.as_object().unwrap();
            assert!(!object.contains_key("delete_password"));
            assert!(!object.contains_key("reported"));
        }
    }
}
