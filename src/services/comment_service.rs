use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::{Comment, NewComment, UserDirectory, next_id},
    services::collection::Collection,
    storage::{BlobStore, COMMENTS_KEY},
};

pub struct CommentLedger {
    comments: Collection<Comment>,
    directory: Option<Arc<dyn UserDirectory>>,
}

impl CommentLedger {
    pub fn new(store: BlobStore) -> Self {
        Self {
            comments: Collection::load(store, COMMENTS_KEY),
            directory: None,
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn add_comment(&self, new: NewComment) -> Comment {
        let user_id = new.user_id.unwrap_or(0);
        let user_name = new.user_name.or_else(|| {
            self.directory
                .as_ref()
                .and_then(|d| d.get_user_by_id(user_id))
                .map(|u| u.name)
        });

        let comment = self.comments.modify(|comments| {
            let comment = Comment {
                comment_id: next_id(comments.iter().map(|c| c.comment_id)),
                idea_id: new.idea_id.unwrap_or(0),
                user_id,
                text: new.text.unwrap_or_default(),
                created_date: new.created_date.unwrap_or_else(Utc::now),
                user_name,
            };
            comments.push(comment.clone());
            comment
        });

        tracing::debug!("Comment {} added to idea {}", comment.comment_id, comment.idea_id);
        comment
    }

    pub fn get_comments_for_idea(&self, idea_id: i64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .current()
            .iter()
            .filter(|c| c.idea_id == idea_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.comment_id);
        comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StaticUserDirectory, User, UserRole, UserStatus};

    fn comment(idea_id: i64, text: &str) -> NewComment {
        NewComment {
            idea_id: Some(idea_id),
            user_id: Some(4),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn comments_get_increasing_ids_and_stay_per_idea() {
        let ledger = CommentLedger::new(BlobStore::in_memory());
        ledger.add_comment(comment(1, "first"));
        ledger.add_comment(comment(2, "elsewhere"));
        ledger.add_comment(comment(1, "second"));

        let texts: Vec<String> = ledger
            .get_comments_for_idea(1)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(ledger.get_comments_for_idea(2)[0].comment_id, 2);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let ledger = CommentLedger::new(BlobStore::in_memory());
        let added = ledger.add_comment(NewComment::default());

        assert_eq!(added.comment_id, 1);
        assert_eq!(added.idea_id, 0);
        assert_eq!(added.text, "");
        assert_eq!(added.user_name, None);
    }

    #[test]
    fn supplied_user_name_is_kept() {
        let ledger = CommentLedger::new(BlobStore::in_memory());
        let added = ledger.add_comment(NewComment {
            user_name: Some("Alice Developer".to_string()),
            ..comment(1, "hi")
        });
        assert_eq!(added.user_name.as_deref(), Some("Alice Developer"));
    }

    #[test]
    fn author_name_is_resolved_from_the_directory() {
        let directory = StaticUserDirectory::new([User {
            user_id: 4,
            name: "Alice Developer".to_string(),
            email: "alice.dev@company.com".to_string(),
            role: UserRole::Employee,
            department: "Engineering".to_string(),
            status: UserStatus::Active,
            joined_date: "2023-03-01T09:00:00Z".parse().unwrap(),
            last_login_date: None,
        }]);
        let ledger = CommentLedger::new(BlobStore::in_memory()).with_directory(Arc::new(directory));

        let named = ledger.add_comment(comment(1, "known author"));
        let unknown = ledger.add_comment(NewComment {
            user_id: Some(40),
            ..comment(1, "unknown author")
        });

        assert_eq!(named.user_name.as_deref(), Some("Alice Developer"));
        assert_eq!(unknown.user_name, None);
    }

    #[test]
    fn ids_continue_from_stored_comments() {
        let store = BlobStore::in_memory();
        CommentLedger::new(store.clone()).add_comment(comment(1, "before restart"));

        let reopened = CommentLedger::new(store);
        assert_eq!(reopened.add_comment(comment(1, "after")).comment_id, 2);
    }
}
