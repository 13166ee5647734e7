//! `search.*` facade.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Rpc;
use crate::error::Result;
use crate::protocol::{param, Decode, Decoder, Param, Value};

/// Remote method names of the search service.
pub mod methods {
    /// `search.getSearchFilters`
    pub const GET_SEARCH_FILTERS: &str = "search.getSearchFilters";
    /// `search.performSearch`
    pub const PERFORM_SEARCH: &str = "search.performSearch";

    /// Every method of this service.
    pub const ALL: &[&str] = &[GET_SEARCH_FILTERS, PERFORM_SEARCH];
}

/// A filter returned by `search.getSearchFilters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Filter name, as passed to `perform_search`.
    pub name: String,
    /// Display description.
    pub description: String,
}

impl Decode for SearchFilter {
    fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
        let [name, description] = decoder.tuple::<2>(value)?;
        Ok(Self {
            name: decoder.field("name", name)?,
            description: decoder.field("description", description)?,
        })
    }
}

/// A hit returned by `search.performSearch`.
///
/// The server may send nil for any field; such fields hold their default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResult {
    pub href: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub author: String,
    pub excerpt: String,
}

impl Decode for SearchResult {
    fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
        let [href, title, date, author, excerpt] = decoder.tuple::<5>(value)?;
        Ok(Self {
            href: decoder.nilable("href", href)?,
            title: decoder.nilable("title", title)?,
            date: decoder.nilable("date", date)?,
            author: decoder.nilable("author", author)?,
            excerpt: decoder.nilable("excerpt", excerpt)?,
        })
    }
}

/// Search API service.
#[derive(Debug, Clone)]
pub struct SearchService {
    rpc: Rpc,
}

impl SearchService {
    pub(crate) fn new(rpc: Rpc) -> Self {
        Self { rpc }
    }

    /// Call `search.getSearchFilters`.
    pub fn get_search_filters(&self) -> Result<Vec<SearchFilter>> {
        self.rpc.call(methods::GET_SEARCH_FILTERS, None)
    }

    /// Call `search.performSearch`.
    ///
    /// Without `filters` the server searches with all filters enabled.
    pub fn perform_search(&self, query: &str, filters: Option<&[&str]>) -> Result<Vec<SearchResult>> {
        let args = self.rpc.pack([param::string(query), Param::from(filters)])?;
        self.rpc.call(methods::PERFORM_SEARCH, Some(args))
    }
}
