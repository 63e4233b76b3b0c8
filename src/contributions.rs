//! Contribution fetch pipeline
//!
//! Resolves a user's repositories and branches, then fans out commit
//! fetches across every (repository, branch) pair. Discovery stages are
//! skipped for filters supplied in the query, and per-item fetch
//! failures degrade to empty results so one unreachable repository or
//! branch never sinks the whole run.

use crate::models::{AggregatedResult, BranchCommits, Commit, RepositoryBranches};
use crate::transport::{GitHubTransport, Transport};
use crate::{ContribsError, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Default cap on in-flight API requests per pipeline stage
const DEFAULT_CONCURRENCY_LIMIT: usize = 16;

/// Query for one aggregation run
///
/// Empty `repositories`/`branches` filters mean "discover via the API".
#[derive(Debug, Clone, Default)]
pub struct CommitsQuery {
    /// GitHub login whose commits are fetched (required)
    pub login: String,
    /// Restrict the run to these repositories (empty = discover)
    pub repositories: Vec<String>,
    /// Restrict every repository to these branches (empty = discover)
    pub branches: Vec<String>,
}

impl CommitsQuery {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            ..Default::default()
        }
    }

    /// Restrict the run to a single repository
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repositories.push(repository.into());
        self
    }

    /// Restrict the run to the given repositories
    pub fn repositories<I, S>(mut self, repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repositories.extend(repositories.into_iter().map(Into::into));
        self
    }

    /// Restrict every repository to a single branch
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branches.push(branch.into());
        self
    }

    /// Restrict every repository to the given branches
    pub fn branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches.extend(branches.into_iter().map(Into::into));
        self
    }
}

/// Contribution fetcher over a transport
pub struct Contributions<T: Transport> {
    transport: T,
    concurrency_limit: usize,
}

impl Contributions<GitHubTransport> {
    /// Create a fetcher against the public GitHub API.
    ///
    /// Returns a configuration error if either credential is empty.
    pub fn github(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(GitHubTransport::new(client_id, client_secret)?))
    }
}

impl<T: Transport> Contributions<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }

    /// Cap in-flight API requests per pipeline stage (minimum 1)
    pub fn with_concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = limit.max(1);
        self
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the user's commits across repositories and branches.
    ///
    /// Authenticates first (fatal on failure), then resolves
    /// repositories, resolves branches per repository, and fetches
    /// commits per (repository, branch) pair, each stage fanned out
    /// concurrently up to the configured limit. The nested result is
    /// ordered by repository resolution order, then branch order; pass
    /// it to [`crate::merge::merge_all`] for the deduplicated view.
    pub async fn commits(&self, query: &CommitsQuery) -> Result<AggregatedResult> {
        if query.login.is_empty() {
            return Err(ContribsError::Config("login is required".to_string()));
        }

        // Authenticate up front so bad credentials or an exhausted rate
        // limit fail the run before any fan-out starts.
        self.transport.authenticate().await?;

        let repositories = self
            .resolve_repositories(&query.login, &query.repositories)
            .await;

        debug!(
            login = %query.login,
            repositories = repositories.len(),
            "Resolved repositories"
        );

        let with_branches: Vec<RepositoryBranches> = stream::iter(&repositories)
            .map(|repository| self.resolve_branches(&query.login, repository, &query.branches))
            .buffered(self.concurrency_limit)
            .collect()
            .await;

        // Flatten to (repository, branch) pairs in repository-major
        // order; the ordered buffer preserves that order, so the flat
        // result can be regrouped by branch counts afterwards.
        let branch_counts: Vec<usize> = with_branches.iter().map(|rb| rb.branches.len()).collect();
        let pairs: Vec<(String, String)> = with_branches
            .iter()
            .flat_map(|rb| {
                rb.branches
                    .iter()
                    .map(|branch| (rb.repository.clone(), branch.clone()))
            })
            .collect();

        debug!(pairs = pairs.len(), "Fetching commits per branch");

        let fetched: Vec<BranchCommits> = stream::iter(pairs)
            .map(|(repository, branch)| {
                self.fetch_branch_commits(&query.login, repository, branch)
            })
            .buffered(self.concurrency_limit)
            .collect()
            .await;

        let mut fetched = fetched.into_iter();
        let result: AggregatedResult = branch_counts
            .into_iter()
            .map(|count| fetched.by_ref().take(count).collect())
            .collect();

        info!(
            login = %query.login,
            repositories = result.len(),
            "Aggregation complete"
        );

        Ok(result)
    }

    /// Resolve the repository names to process.
    ///
    /// A non-empty explicit list is returned unchanged without touching
    /// the network. A failed or malformed listing degrades to an empty
    /// list: "cannot list repos" means "no repos to report on".
    async fn resolve_repositories(&self, login: &str, explicit: &[String]) -> Vec<String> {
        if !explicit.is_empty() {
            return explicit.to_vec();
        }

        let path = format!("/users/{}/repos", login);
        match self.fetch_names(&path).await {
            Ok(names) => names,
            Err(e) => {
                warn!(login = %login, error = %e, "Failed to list repositories, treating as empty");
                Vec::new()
            }
        }
    }

    /// Resolve the branches of one repository.
    ///
    /// Same contract as repository resolution: explicit lists skip the
    /// network, failures degrade to an empty branch list.
    async fn resolve_branches(
        &self,
        login: &str,
        repository: &str,
        explicit: &[String],
    ) -> RepositoryBranches {
        if !explicit.is_empty() {
            return RepositoryBranches {
                repository: repository.to_string(),
                branches: explicit.to_vec(),
            };
        }

        let path = format!("/repos/{}/{}/branches", login, repository);
        let branches = match self.fetch_names(&path).await {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    repository = %repository,
                    error = %e,
                    "Failed to list branches, treating as empty"
                );
                Vec::new()
            }
        };

        RepositoryBranches {
            repository: repository.to_string(),
            branches,
        }
    }

    /// Fetch the commits authored by `login` on one branch.
    ///
    /// Failures degrade to an empty commit list for that branch.
    async fn fetch_branch_commits(
        &self,
        login: &str,
        repository: String,
        branch: String,
    ) -> BranchCommits {
        let path = format!(
            "/repos/{}/{}/commits?author={}&sha={}",
            login,
            repository,
            urlencoding::encode(login),
            urlencoding::encode(&branch)
        );

        let commits = match self.transport.get(&path).await {
            Ok(value) => match serde_json::from_value::<Vec<Commit>>(value) {
                Ok(commits) => commits,
                Err(e) => {
                    warn!(
                        repository = %repository,
                        branch = %branch,
                        error = %e,
                        "Malformed commit list, treating as empty"
                    );
                    Vec::new()
                }
            },
            Err(e) => {
                warn!(
                    repository = %repository,
                    branch = %branch,
                    error = %e,
                    "Failed to fetch commits, treating as empty"
                );
                Vec::new()
            }
        };

        BranchCommits {
            repository,
            branch,
            commits,
        }
    }

    /// GET a path returning an array of objects and extract their `name`s
    async fn fetch_names(&self, path: &str) -> Result<Vec<String>> {
        #[derive(serde::Deserialize)]
        struct Named {
            name: String,
        }

        let value = self.transport.get(path).await?;
        let items: Vec<Named> = serde_json::from_value(value)?;
        Ok(items.into_iter().map(|item| item.name).collect())
    }
}
