//! Taxo Core Library
//!
//! Data contracts shared by the taxonomy graph crates: the four node
//! entities, the inbound feed records and the query response envelope.

pub mod envelope;
pub mod error;
pub mod feed;
pub mod model;

pub use envelope::Envelope;
pub use error::{TaxoError, TaxoResult};
pub use feed::{DnshEntry, MatchRecord, TaxonomyFeed};
pub use model::{Activity, Criteria, NodeId, Objective, Sector};
