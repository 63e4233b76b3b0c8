//! Data model for the fetch pipeline
//!
//! API-shaped types (`Commit` and friends) mirror the GitHub REST v3
//! payloads; report types (`CommitSummary`, `RepositoryReport`) are the
//! merged, caller-facing shapes.

use serde::{Deserialize, Serialize};

/// A commit as returned by `GET /repos/{owner}/{repo}/commits`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub parents: Vec<CommitParent>,
    pub commit: CommitDetail,
    #[serde(default)]
    pub url: String,
}

impl Commit {
    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    /// A merge commit has more than one parent
    pub fn is_merge(&self) -> bool {
        self.parent_count() > 1
    }
}

/// Parent reference nested in a commit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitParent {
    #[serde(default)]
    pub sha: String,
}

/// The `commit` object nested in a commit payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: CommitAuthor,
    #[serde(default)]
    pub message: String,
}

/// The `commit.author` object nested in a commit payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
}

/// Branches resolved for one repository, in resolution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryBranches {
    pub repository: String,
    pub branches: Vec<String>,
}

/// Raw commit list for one (repository, branch) pair
#[derive(Debug, Clone, Serialize)]
pub struct BranchCommits {
    pub repository: String,
    pub branch: String,
    pub commits: Vec<Commit>,
}

/// The nested result of one aggregation run: per repository (in
/// resolution order), one `BranchCommits` per branch (in branch order)
pub type AggregatedResult = Vec<Vec<BranchCommits>>;

/// A single commit in a merged report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub author: String,
    pub date: String,
    pub message: String,
    pub url: String,
}

impl From<&Commit> for CommitSummary {
    fn from(c: &Commit) -> Self {
        Self {
            sha: c.sha.clone(),
            author: c.commit.author.name.clone(),
            date: c.commit.author.date.clone(),
            message: c.commit.message.clone(),
            url: c.url.clone(),
        }
    }
}

/// Merged, deduplicated report for one repository
///
/// `branches` lists the branches where commits were found, in encounter
/// order. `commits` is deduplicated by sha (first branch wins) with
/// merge commits excluded.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryReport {
    pub repository: String,
    pub branches: Vec<String>,
    pub commits: Vec<CommitSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(sha: &str, parents: usize) -> Commit {
        Commit {
            sha: sha.to_string(),
            parents: (0..parents)
                .map(|i| CommitParent {
                    sha: format!("p{}", i),
                })
                .collect(),
            commit: CommitDetail {
                author: CommitAuthor {
                    name: "alice".to_string(),
                    date: "2016-03-01T10:00:00Z".to_string(),
                },
                message: "msg".to_string(),
            },
            url: format!("https://api.github.com/repos/alice/r1/commits/{}", sha),
        }
    }

    #[test]
    fn test_merge_detection() {
        assert!(!commit("a1", 0).is_merge());
        assert!(!commit("a1", 1).is_merge());
        assert!(commit("a2", 2).is_merge());
    }

    #[test]
    fn test_commit_deserialization() {
        let payload = serde_json::json!({
            "sha": "a1",
            "url": "https://api.github.com/repos/alice/r1/commits/a1",
            "parents": [{"sha": "p1"}],
            "commit": {
                "author": {"name": "alice", "date": "2016-03-01T10:00:00Z"},
                "message": "initial commit"
            }
        });

        let c: Commit = serde_json::from_value(payload).unwrap();
        assert_eq!(c.sha, "a1");
        assert_eq!(c.parent_count(), 1);
        assert_eq!(c.commit.author.name, "alice");
    }

    #[test]
    fn test_commit_summary_from_commit() {
        let c = commit("a1", 1);
        let s = CommitSummary::from(&c);
        assert_eq!(s.sha, "a1");
        assert_eq!(s.author, "alice");
        assert_eq!(s.message, "msg");
    }
}
