pub mod comment;
pub mod idea;
pub mod review;
pub mod user;
pub mod vote;

pub use comment::*;
pub use idea::*;
pub use review::*;
pub use user::*;
pub use vote::*;

/// Next identifier for a collection: one past the current maximum, or 1 when empty.
/// Saturates at `i64::MAX` instead of overflowing on foreign data.
pub fn next_id(ids: impl IntoIterator<Item = i64>) -> i64 {
    ids.into_iter().max().map_or(1, |max| max.saturating_add(1))
}
