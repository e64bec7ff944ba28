// Core algorithm exports
pub mod filters;
pub mod keywords;
pub mod matcher;
pub mod scoring;

pub use filters::{classify_size, is_excluded, match_industry, shared_challenges, IndustryMatch, SizeTier};
pub use keywords::{KeywordVocabulary, DEFAULT_KEYWORDS};
pub use matcher::{Matcher, Ranking};
pub use scoring::{calculate_match_score, MAX_SCORE};
