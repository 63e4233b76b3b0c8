//! contribs - GitHub user contribution history fetcher
//!
//! Retrieves a user's commit history across a set of repositories and
//! branches, deduplicating commits that appear on multiple branches and
//! excluding merge commits. Repositories and branches not named in the
//! query are discovered via the API; all fetches within a stage run
//! concurrently up to a configurable limit.
//!
//! # Architecture
//!
//! - **transport**: `Transport` trait and the reqwest GitHub transport
//! - **models**: API payload shapes and merged report types
//! - **contributions**: resolver/fetcher pipeline and aggregation
//! - **merge**: per-repository dedup of the aggregated result
//!
//! # Example
//!
//! ```no_run
//! use contribs::{merge, CommitsQuery, Contributions};
//!
//! # async fn run() -> contribs::Result<()> {
//! let client = Contributions::github("client_id", "client_secret")?;
//! let query = CommitsQuery::new("martinerko").branch("master");
//! let result = client.commits(&query).await?;
//! for report in merge::merge_all(&result) {
//!     println!("{}: {} commits", report.repository, report.commits.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod contributions;
pub mod error;
pub mod logging;
pub mod merge;
pub mod models;
pub mod transport;

// Re-exports
pub use contributions::{CommitsQuery, Contributions};
pub use error::{ContribsError, Result};
pub use models::{AggregatedResult, BranchCommits, CommitSummary, RepositoryReport};
pub use transport::{GitHubTransport, Transport};
