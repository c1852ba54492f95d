use std::sync::Arc;

use chrono::Utc;

use crate::{
    models::{Idea, IdeaStatus, NewIdea, next_id},
    services::collection::{Collection, Subscription},
    storage::{BlobStore, IDEAS_KEY},
};

/// The idea collection observers see. Status and tallies only change through
/// [`IdeaRepository::set_status`] and [`IdeaRepository::set_tallies`].
pub struct IdeaRepository {
    ideas: Collection<Idea>,
}

impl IdeaRepository {
    pub fn new(store: BlobStore) -> Self {
        Self {
            ideas: Collection::load(store, IDEAS_KEY),
        }
    }

    /// Newest first.
    pub fn get_all(&self) -> Arc<Vec<Idea>> {
        self.ideas.current()
    }

    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[Idea]) + Send + Sync + 'static,
    {
        self.ideas.subscribe(observer)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.ideas.unsubscribe(subscription)
    }

    pub fn get_idea_by_id(&self, idea_id: i64) -> Option<Idea> {
        self.ideas
            .current()
            .iter()
            .find(|idea| idea.idea_id == idea_id)
            .cloned()
    }

    pub fn create_idea(&self, new: NewIdea) -> Idea {
        let idea = self.ideas.modify(|ideas| {
            let idea = Idea {
                idea_id: next_id(ideas.iter().map(|i| i.idea_id)),
                title: new
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_string()),
                description: new.description.unwrap_or_default(),
                category_id: new.category_id.unwrap_or(0),
                category: new.category.unwrap_or_default(),
                submitted_by_user_id: new.submitted_by_user_id.unwrap_or(0),
                submitted_date: new.submitted_date.unwrap_or_else(Utc::now),
                status: new.status.unwrap_or_default(),
                upvotes: 0,
                downvotes: 0,
            };
            ideas.insert(0, idea.clone());
            idea
        });

        tracing::info!("Created idea {} ({})", idea.idea_id, idea.title);
        idea
    }

    /// Unconditionally overwrites the status. Unknown ids are ignored.
    pub fn set_status(&self, idea_id: i64, status: IdeaStatus) -> bool {
        let updated = self.update_idea(idea_id, |idea| idea.status = status);
        if updated {
            tracing::debug!("Idea {} status set to {}", idea_id, status);
        } else {
            tracing::debug!("Ignoring status change for unknown idea {}", idea_id);
        }
        updated
    }

    /// Overwrites the cached tallies. Unknown ids are ignored.
    pub fn set_tallies(&self, idea_id: i64, upvotes: u32, downvotes: u32) -> bool {
        let updated = self.update_idea(idea_id, |idea| {
            idea.upvotes = upvotes;
            idea.downvotes = downvotes;
        });
        if updated {
            tracing::debug!("Idea {} tallies set to +{}/-{}", idea_id, upvotes, downvotes);
        }
        updated
    }

    fn update_idea<F>(&self, idea_id: i64, f: F) -> bool
    where
        F: FnOnce(&mut Idea),
    {
        self.ideas
            .update(|ideas| {
                let idea = ideas.iter_mut().find(|i| i.idea_id == idea_id)?;
                f(idea);
                Some(())
            })
            .is_some()
    }
}
