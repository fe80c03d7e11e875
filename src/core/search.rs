use crate::core::access::{Capability, Session};
use crate::db::pool::DbPool;
use crate::db::search::search_all;
use crate::errors::{AppError, AppResult};
use crate::models::search::SearchHit;

pub struct SearchLogic;

impl SearchLogic {
    /// Global search over the fixed entity set. A term that matches
    /// nothing yields an empty list, not an error.
    pub fn run(pool: &DbPool, session: &Session, term: &str) -> AppResult<Vec<SearchHit>> {
        session.require(Capability::GlobalSearch)?;

        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::Validation("Please enter a search term.".into()));
        }

        let hits = search_all(&pool.conn, term)?;
        tracing::debug!(term, hits = hits.len(), "global search");
        Ok(hits)
    }
}
