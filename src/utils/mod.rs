//! Utility modules for SG qualification
//!
//! Shared functionality applied around the evaluator:
//! - Margin: display prefix past the cutoff
//! - Overlay: official prize / fan-vote rankings merged into records
//! - Venues: venue code and name lookup

pub mod margin;
pub mod overlay;
pub mod venues;

// Re-export commonly used types
pub use margin::{with_margin, MarginSummary, DEFAULT_MARGIN};
pub use overlay::{apply_official_rankings, RankingEntry};
pub use venues::{venue_code, venue_by_code, Venue, VENUES};
