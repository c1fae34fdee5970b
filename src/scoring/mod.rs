//! Per-resort score aggregation and ranking.
//!
//! Each camera's rating is normalized into numeric field contributions,
//! contributions are averaged per field across a resort's cameras, and the
//! per-field means are averaged again into a composite score that orders
//! the resorts. Everything here is pure: no I/O, no caching, and the input
//! document is only ever borrowed.

pub mod aggregate;
pub mod normalize;
pub mod rank;
pub mod types;
pub mod utility;

pub use aggregate::{aggregate_cameras, resort_averages};
pub use normalize::contributions;
pub use rank::{rank_document, rank_resorts};
pub use types::{CompositePolicy, RankedDocument, RankedResort, ResortAverages};
