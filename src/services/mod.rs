// Service exports
pub mod cache;
pub mod matching;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use cache::CachedCaseRepository;
pub use matching::{MatchError, MatchErrorKind, MatchService};
pub use memory::InMemoryCaseStore;
pub use postgres::PostgresCaseStore;
pub use repository::{CaseRepository, ProspectLog, RepositoryError};
