// Model exports
pub mod codec;
pub mod domain;
pub mod requests;
pub mod responses;

pub use codec::{decode_list, encode_list, RecordDecodeError};
pub use domain::{CaseLists, CaseRecord, MatchResult, ProspectQuery, ProspectSubmission, ScoredCase, StoredCase};
pub use requests::MatchCaseRequest;
pub use responses::{ErrorResponse, HealthResponse};
