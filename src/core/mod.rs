pub mod candidate;
pub mod search_response;

pub use candidate::Candidate;
pub use search_response::{DirectoryResponse, ErrorResponse, RankingMethod, SearchResponse};
