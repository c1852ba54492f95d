use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    #[serde(rename = "commentID")]
    pub comment_id: i64,
    #[serde(rename = "ideaID")]
    pub idea_id: i64,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub text: String,
    #[serde(rename = "createdDate")]
    pub created_date: DateTime<Utc>,
    /// Display name cached at write time.
    #[serde(rename = "userName", default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

// Create comment request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    #[serde(rename = "ideaID")]
    pub idea_id: Option<i64>,
    #[serde(rename = "userID")]
    pub user_id: Option<i64>,
    pub text: Option<String>,
    #[serde(rename = "createdDate")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
}
