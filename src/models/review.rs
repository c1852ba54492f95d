use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::IdeaStatus;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    #[default]
    Reject,
}

impl ReviewDecision {
    /// Status an idea takes once a review with this decision is recorded.
    pub fn target_status(self) -> IdeaStatus {
        match self {
            ReviewDecision::Approve => IdeaStatus::Approved,
            ReviewDecision::Reject => IdeaStatus::Rejected,
        }
    }
}

impl FromStr for ReviewDecision {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Approve" | "approve" => Ok(ReviewDecision::Approve),
            "Reject" | "reject" => Ok(ReviewDecision::Reject),
            _ => Err(format!("Unknown ReviewDecision: {}", s)),
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Approve => f.write_str("Approve"),
            ReviewDecision::Reject => f.write_str("Reject"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    #[serde(rename = "reviewID")]
    pub review_id: i64,
    #[serde(rename = "ideaID")]
    pub idea_id: i64,
    #[serde(rename = "reviewerID")]
    pub reviewer_id: i64,
    #[serde(rename = "reviewerName", default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    pub feedback: String,
    pub decision: ReviewDecision,
    #[serde(rename = "reviewDate")]
    pub review_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    #[serde(rename = "ideaID")]
    pub idea_id: Option<i64>,
    #[serde(rename = "reviewerID")]
    pub reviewer_id: Option<i64>,
    #[serde(rename = "reviewerName")]
    pub reviewer_name: Option<String>,
    pub feedback: Option<String>,
    pub decision: Option<ReviewDecision>,
    #[serde(rename = "reviewDate")]
    pub review_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_project_onto_statuses() {
        assert_eq!(ReviewDecision::Approve.target_status(), IdeaStatus::Approved);
        assert_eq!(ReviewDecision::Reject.target_status(), IdeaStatus::Rejected);
        assert_eq!(ReviewDecision::default(), ReviewDecision::Reject);
    }

    #[test]
    fn decision_round_trips_through_strings() {
        for decision in [ReviewDecision::Approve, ReviewDecision::Reject] {
            assert_eq!(decision.to_string().parse::<ReviewDecision>(), Ok(decision));
        }
        assert_eq!("approve".parse::<ReviewDecision>(), Ok(ReviewDecision::Approve));
    }

    #[test]
    fn unknown_decision_is_rejected() {
        let err = "Maybe".parse::<ReviewDecision>().unwrap_err();
        assert_eq!(err, "Unknown ReviewDecision: Maybe");
    }

    #[test]
    fn reviewer_name_is_optional_on_the_wire() {
        let raw = r#"[{
            "reviewID": 1,
            "ideaID": 7,
            "reviewerID": 2,
            "feedback": "Worth a pilot",
            "decision": "Approve",
            "reviewDate": "2024-05-02T10:30:00.000Z"
        }]"#;

        let reviews: Vec<Review> = serde_json::from_str(raw).unwrap();
        assert_eq!(reviews[0].reviewer_name, None);
        assert_eq!(reviews[0].decision, ReviewDecision::Approve);

        let back = serde_json::to_value(&reviews[0]).unwrap();
        assert!(back.get("reviewerName").is_none());
    }
}
