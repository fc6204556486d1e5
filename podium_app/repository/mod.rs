mod relationship_repository;
mod score_repository;
mod user_repository;

pub use relationship_repository::RelationshipRepository;
pub use score_repository::ScoreRepository;
pub use user_repository::UserRepository;
