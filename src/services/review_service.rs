use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::{NewReview, Review, UserDirectory, next_id},
    services::{collection::Collection, idea_service::IdeaRepository},
    storage::{BlobStore, REVIEWS_KEY},
};

/// Append-only review log. Every review sets the idea's status from its
/// decision, so the latest review always wins.
pub struct ReviewWorkflow {
    reviews: Collection<Review>,
    ideas: Arc<IdeaRepository>,
    directory: Option<Arc<dyn UserDirectory>>,
}

impl ReviewWorkflow {
    pub fn new(store: BlobStore, ideas: Arc<IdeaRepository>) -> Self {
        Self {
            reviews: Collection::load(store, REVIEWS_KEY),
            ideas,
            directory: None,
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn UserDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn add_review(&self, new: NewReview) -> Review {
        let reviewer_id = new.reviewer_id.unwrap_or(0);
        let reviewer_name = new.reviewer_name.or_else(|| {
            self.directory
                .as_ref()
                .and_then(|d| d.get_user_by_id(reviewer_id))
                .map(|u| u.name)
        });

        let review = self.reviews.modify(|reviews| {
            let review = Review {
                review_id: next_id(reviews.iter().map(|r| r.review_id)),
                idea_id: new.idea_id.unwrap_or(0),
                reviewer_id,
                reviewer_name,
                feedback: new.feedback.unwrap_or_default(),
                decision: new.decision.unwrap_or_default(),
                review_date: new.review_date.unwrap_or_else(Utc::now),
            };
            reviews.push(review.clone());
            review
        });

        tracing::info!(
            "Review {} on idea {}: {}",
            review.review_id,
            review.idea_id,
            review.decision
        );
        self.ideas
            .set_status(review.idea_id, review.decision.target_status());

        review
    }

    /// Oldest first.
    pub fn get_reviews_for_idea(&self, idea_id: i64) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .current()
            .iter()
            .filter(|r| r.idea_id == idea_id)
            .cloned()
            .collect();
        reviews.sort_by_key(|r| r.review_id);
        reviews
    }
}
