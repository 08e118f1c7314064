//! Search result types
//!
//! Raw hits from the server are normalized into [`SearchResult`] records and
//! collected, ranked by score, into a [`SearchResponse`].

mod response;
mod types;

pub use response::SearchResponse;
pub use types::SearchResult;
