pub mod collection;
pub mod comment_service;
pub mod idea_service;
pub mod review_service;
pub mod vote_service;

pub use collection::{Collection, Subscription};
pub use comment_service::CommentLedger;
pub use idea_service::IdeaRepository;
pub use review_service::ReviewWorkflow;
pub use vote_service::VoteLedger;
