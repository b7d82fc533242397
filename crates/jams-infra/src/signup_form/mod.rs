//! Signup form state repositories.

pub mod file_repo;
pub mod memory_repo;

pub use file_repo::FileSignupFormStateRepository;
pub use memory_repo::InMemorySignupFormStateRepository;
