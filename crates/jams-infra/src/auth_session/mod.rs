//! Auth session repositories.

pub mod file_repo;
pub mod memory_repo;

pub use file_repo::FileAuthSessionRepository;
pub use memory_repo::InMemoryAuthSessionRepository;
