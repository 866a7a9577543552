//! Parsed model rewrites.

mod candidate;
mod parser;
mod set;

pub use candidate::Candidate;
pub use parser::parse_response;
pub use set::CandidateSet;
