//! Reporting module.
//!
//! Pure, stateless functions over a snapshot of the persisted history:
//! availability aggregation, timeline projection, and presentation
//! formatting. Everything here is recomputed per call; there is no
//! cache to invalidate.

mod aggregate;
mod format;
mod timeline;

pub use aggregate::*;
pub use format::*;
pub use timeline::*;
