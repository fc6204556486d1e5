mod relationship_repository;
mod score_repository;
mod user_repository;

pub use relationship_repository::PostgresRelationshipRepository;
pub use score_repository::PostgresScoreRepository;
pub use user_repository::PostgresUserRepository;
