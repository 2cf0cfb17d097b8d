//! SG Qualifier
//!
//! Eligibility ranking for the eight SG (Special Grade) boat races.
//!
//! Module layout:
//! - `types`: tournament types, performance records, qualification results
//! - `criteria`: static per-tournament selection table
//! - `qualification/`: one ranking rule per tournament type
//! - `utils/`: margin selector, official-ranking overlay, venue table
//! - `schedule`: the 2026 SG calendar
//! - `scrape`: regex extraction from upstream HTML pages
//!
//! With the `api` feature: `config`, `client` (upstream fetches) and the
//! Axum proxy in `api_server`.

pub mod types;
pub mod criteria;
pub mod qualification;
pub mod utils;
pub mod schedule;
pub mod scrape;

#[cfg(feature = "api")]
pub mod config;
#[cfg(feature = "api")]
pub mod client;
#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use types::{ClassRank, ParseClassRankError, ParseTournamentError, PerformanceRecord, QualificationResult, StatValue, TournamentType};
pub use criteria::{all_criteria, criteria_for, QualificationCriteria};
pub use qualification::{evaluate, evaluate_all, evaluate_with_criteria};
pub use utils::{apply_official_rankings, with_margin, MarginSummary, RankingEntry, DEFAULT_MARGIN};
pub use schedule::{race_for, SgRace, SG_SCHEDULE_2026};
pub use scrape::{scheduled_races, HtmlParser, ScheduledRace};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use client::{BoatraceClient, FetchError};
#[cfg(feature = "api")]
pub use config::ServerConfig;
