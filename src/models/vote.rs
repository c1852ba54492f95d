use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl FromStr for VoteType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Upvote" | "upvote" | "up" => Ok(VoteType::Upvote),
            "Downvote" | "downvote" | "down" => Ok(VoteType::Downvote),
            _ => Err(format!("Unknown VoteType: {}", s)),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteType::Upvote => f.write_str("Upvote"),
            VoteType::Downvote => f.write_str("Downvote"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    #[serde(rename = "voteID")]
    pub vote_id: i64,
    #[serde(rename = "ideaID")]
    pub idea_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "voteType")]
    pub vote_type: VoteType,
}

// Vote response
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The caller's vote after the toggle, `None` if it was withdrawn.
    pub user_vote: Option<VoteType>,
    pub upvotes: u32,
    pub downvotes: u32,
    pub score: i64,
}
