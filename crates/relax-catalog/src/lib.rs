//! Client for the 2GIS-style business catalog: firm search by term and
//! place, and firm profile lookup for the rating.

pub mod client;
pub mod error;
pub mod rating;
pub mod types;

pub use client::{CatalogClient, SEARCH_PAGE_SIZE};
pub use error::CatalogError;
pub use rating::Rating;
pub use types::{Candidate, ProfileResponse, SearchResponse};
