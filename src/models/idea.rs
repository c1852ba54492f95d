use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IdeaStatus {
    #[default]
    UnderReview,
    Approved,
    Rejected,
}

impl FromStr for IdeaStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UnderReview" | "under_review" => Ok(IdeaStatus::UnderReview),
            "Approved" | "approved" => Ok(IdeaStatus::Approved),
            "Rejected" | "rejected" => Ok(IdeaStatus::Rejected),
            _ => Err(format!("Unknown IdeaStatus: {}", s)),
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IdeaStatus::UnderReview => "UnderReview",
            IdeaStatus::Approved => "Approved",
            IdeaStatus::Rejected => "Rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Idea {
    #[serde(rename = "ideaID")]
    pub idea_id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "categoryID")]
    pub category_id: i64,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "submittedByUserID")]
    pub submitted_by_user_id: i64,
    #[serde(rename = "submittedDate")]
    pub submitted_date: DateTime<Utc>,
    pub status: IdeaStatus,
    // Derived from the vote ledger; never taken from caller input.
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default)]
    pub downvotes: u32,
}

impl Idea {
    pub fn score(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// Caller-supplied fields for a new idea. Unset fields get defaults on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewIdea {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "categoryID")]
    pub category_id: Option<i64>,
    pub category: Option<String>,
    #[serde(rename = "submittedByUserID")]
    pub submitted_by_user_id: Option<i64>,
    #[serde(rename = "submittedDate")]
    pub submitted_date: Option<DateTime<Utc>>,
    pub status: Option<IdeaStatus>,
}
