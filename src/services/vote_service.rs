use std::sync::Arc;

use crate::{
    models::{Vote, VoteOutcome, VoteType, next_id},
    services::{collection::Collection, idea_service::IdeaRepository},
    storage::{BlobStore, VOTES_KEY},
};

/// One vote per (idea, user). Voting the same way twice withdraws the vote;
/// voting the other way flips it in place.
pub struct VoteLedger {
    votes: Collection<Vote>,
    ideas: Arc<IdeaRepository>,
}

impl VoteLedger {
    pub fn new(store: BlobStore, ideas: Arc<IdeaRepository>) -> Self {
        Self {
            votes: Collection::load(store, VOTES_KEY),
            ideas,
        }
    }

    pub fn vote(&self, idea_id: i64, user_id: i64, vote_type: VoteType) -> VoteOutcome {
        let user_vote = self.votes.modify(|votes| {
            // Collapse duplicates a foreign writer may have left for this pair.
            let mut seen = false;
            votes.retain(|v| {
                if v.idea_id != idea_id || v.user_id != user_id {
                    return true;
                }
                let keep = !seen;
                seen = true;
                keep
            });

            match votes
                .iter()
                .position(|v| v.idea_id == idea_id && v.user_id == user_id)
            {
                Some(idx) if votes[idx].vote_type == vote_type => {
                    votes.remove(idx);
                    None
                }
                Some(idx) => {
                    votes[idx].vote_type = vote_type;
                    Some(vote_type)
                }
                None => {
                    let vote_id = next_id(votes.iter().map(|v| v.vote_id));
                    votes.push(Vote {
                        vote_id,
                        idea_id,
                        user_id,
                        vote_type,
                    });
                    Some(vote_type)
                }
            }
        });

        match user_vote {
            Some(v) => tracing::debug!("User {} voted {} on idea {}", user_id, v, idea_id),
            None => tracing::debug!("User {} withdrew vote on idea {}", user_id, idea_id),
        }

        let (upvotes, downvotes) = self.recompute_tallies(idea_id);
        VoteOutcome {
            user_vote,
            upvotes,
            downvotes,
            score: i64::from(upvotes) - i64::from(downvotes),
        }
    }

    /// Counts the ledger for `idea_id` and writes the result onto the idea.
    pub fn recompute_tallies(&self, idea_id: i64) -> (u32, u32) {
        let (upvotes, downvotes) = count_votes(&self.votes.current(), idea_id);
        self.ideas.set_tallies(idea_id, upvotes, downvotes);
        (upvotes, downvotes)
    }

    pub fn get_user_vote(&self, idea_id: i64, user_id: i64) -> Option<VoteType> {
        self.votes
            .current()
            .iter()
            .find(|v| v.idea_id == idea_id && v.user_id == user_id)
            .map(|v| v.vote_type)
    }

    pub fn get_votes_for_idea(&self, idea_id: i64) -> Vec<Vote> {
        let mut votes: Vec<Vote> = self
            .votes
            .current()
            .iter()
            .filter(|v| v.idea_id == idea_id)
            .cloned()
            .collect();
        votes.sort_by_key(|v| v.vote_id);
        votes
    }
}

fn count_votes(votes: &[Vote], idea_id: i64) -> (u32, u32) {
    votes
        .iter()
        .filter(|v| v.idea_id == idea_id)
        .fold((0, 0), |(up, down), v| match v.vote_type {
            VoteType::Upvote => (up + 1, down),
            VoteType::Downvote => (up, down + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewIdea;
    use pretty_assertions::assert_eq;

    fn ledger() -> (Arc<IdeaRepository>, VoteLedger) {
        let store = BlobStore::in_memory();
        let ideas = Arc::new(IdeaRepository::new(store.clone()));
        let votes = VoteLedger::new(store, Arc::clone(&ideas));
        (ideas, votes)
    }

    fn tallies(ideas: &IdeaRepository, idea_id: i64) -> (u32, u32) {
        let idea = ideas.get_idea_by_id(idea_id).unwrap();
        (idea.upvotes, idea.downvotes)
    }

    #[test]
    fn first_vote_is_recorded() {
        let (ideas, votes) = ledger();
        let idea = ideas.create_idea(NewIdea::default());

        let outcome = votes.vote(idea.idea_id, 5, VoteType::Upvote);

        assert_eq!(
            outcome,
            VoteOutcome {
                user_vote: Some(VoteType::Upvote),
                upvotes: 1,
                downvotes: 0,
                score: 1,
            }
        );
        assert_eq!(tallies(&ideas, idea.idea_id), (1, 0));
    }

    #[test]
    fn same_vote_twice_withdraws_it() {
        let (ideas, votes) = ledger();
        let idea = ideas.create_idea(NewIdea::default());

        votes.vote(idea.idea_id, 5, VoteType::Upvote);
        let outcome = votes.vote(idea.idea_id, 5, VoteType::Upvote);

        assert_eq!(outcome.user_vote, None);
        assert!(votes.get_votes_for_idea(idea.idea_id).is_empty());
        assert_eq!(tallies(&ideas, idea.idea_id), (0, 0));
    }

    #[test]
    fn opposite_vote_flips_in_place() {
        let (ideas, votes) = ledger();
        let idea = ideas.create_idea(NewIdea::default());

        votes.vote(idea.idea_id, 5, VoteType::Downvote);
        let before = votes.get_votes_for_idea(idea.idea_id);
        votes.vote(idea.idea_id, 5, VoteType::Upvote);
        let after = votes.get_votes_for_idea(idea.idea_id);

        assert_eq!(after.len(), 1);
        assert_eq!(after[0].vote_id, before[0].vote_id);
        assert_eq!(after[0].vote_type, VoteType::Upvote);
        assert_eq!(tallies(&ideas, idea.idea_id), (1, 0));
    }

    #[test]
    fn toggling_alternates_presence() {
        let (ideas, votes) = ledger();
        let idea = ideas.create_idea(NewIdea::default());

        for round in 1..=6 {
            votes.vote(idea.idea_id, 9, VoteType::Downvote);
            let present = votes.get_user_vote(idea.idea_id, 9).is_some();
            assert_eq!(present, round % 2 == 1, "after {} votes", round);
        }
    }

    #[test]
    fn tallies_count_every_voter_and_only_this_idea() {
        let (ideas, votes) = ledger();
        let first = ideas.create_idea(NewIdea::default());
        let second = ideas.create_idea(NewIdea::default());

        votes.vote(first.idea_id, 1, VoteType::Upvote);
        votes.vote(first.idea_id, 2, VoteType::Upvote);
        votes.vote(first.idea_id, 3, VoteType::Downvote);
        votes.vote(second.idea_id, 1, VoteType::Downvote);

        assert_eq!(tallies(&ideas, first.idea_id), (2, 1));
        assert_eq!(tallies(&ideas, second.idea_id), (0, 1));
    }

    #[test]
    fn duplicate_records_are_collapsed_on_the_next_vote() {
        let store = BlobStore::in_memory();
        store.write(
            VOTES_KEY,
            &[
                Vote { vote_id: 1, idea_id: 1, user_id: 5, vote_type: VoteType::Upvote },
                Vote { vote_id: 2, idea_id: 1, user_id: 5, vote_type: VoteType::Upvote },
            ],
        );
        let ideas = Arc::new(IdeaRepository::new(store.clone()));
        ideas.create_idea(NewIdea::default());
        let votes = VoteLedger::new(store, Arc::clone(&ideas));

        votes.vote(1, 5, VoteType::Downvote);

        let remaining = votes.get_votes_for_idea(1);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].vote_id, 1);
        assert_eq!(tallies(&ideas, 1), (0, 1));
    }

    #[test]
    fn recompute_repairs_drifted_tallies() {
        let (ideas, votes) = ledger();
        let idea = ideas.create_idea(NewIdea::default());
        votes.vote(idea.idea_id, 1, VoteType::Upvote);
        ideas.set_tallies(idea.idea_id, 40, 2);

        assert_eq!(votes.recompute_tallies(idea.idea_id), (1, 0));
        assert_eq!(tallies(&ideas, idea.idea_id), (1, 0));
    }

    #[test]
    fn votes_on_unknown_ideas_are_kept_without_touching_ideas() {
        let (ideas, votes) = ledger();
        let outcome = votes.vote(77, 1, VoteType::Upvote);

        assert_eq!(outcome.upvotes, 1);
        assert!(ideas.get_all().is_empty());
    }
}
