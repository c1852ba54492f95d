use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Manager,
    #[default]
    Employee,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub status: UserStatus,
    #[serde(rename = "joinedDate")]
    pub joined_date: DateTime<Utc>,
    #[serde(rename = "lastLoginDate", default, skip_serializing_if = "Option::is_none")]
    pub last_login_date: Option<DateTime<Utc>>,
}

/// Read-only lookup used to fill display names on comments and reviews.
pub trait UserDirectory: Send + Sync {
    fn get_user_by_id(&self, user_id: i64) -> Option<User>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: HashMap<i64, User>,
}

impl StaticUserDirectory {
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.user_id, u)).collect(),
        }
    }
}

impl UserDirectory for StaticUserDirectory {
    fn get_user_by_id(&self, user_id: i64) -> Option<User> {
        self.users.get(&user_id).cloned()
    }
}
