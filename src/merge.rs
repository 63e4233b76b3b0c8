//! Merge and dedup of per-branch commit lists
//!
//! Flattens one repository's `BranchCommits` sequence into a single
//! deduplicated report: first branch (in branch order) wins on duplicate
//! shas, and merge commits are dropped entirely.

use crate::models::{AggregatedResult, BranchCommits, CommitSummary, RepositoryReport};
use std::collections::HashSet;

/// Merge one repository's per-branch commit lists into a report.
///
/// Returns `None` when no commit qualifies; a repository with zero
/// qualifying commits produces no report at all rather than an empty one.
pub fn merge_repository(branches: &[BranchCommits]) -> Option<RepositoryReport> {
    let repository = branches.first()?.repository.clone();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut commits: Vec<CommitSummary> = Vec::new();
    let mut branches_with_commits: Vec<String> = Vec::new();

    for branch in branches {
        if branch.commits.is_empty() {
            continue;
        }
        branches_with_commits.push(branch.branch.clone());

        for commit in &branch.commits {
            // Skip commits already seen on an earlier branch, and merge
            // commits even on first encounter.
            if commit.is_merge() || !seen.insert(commit.sha.as_str()) {
                continue;
            }
            commits.push(CommitSummary::from(commit));
        }
    }

    if commits.is_empty() {
        return None;
    }

    Some(RepositoryReport {
        repository,
        branches: branches_with_commits,
        commits,
    })
}

/// Merge every repository in an aggregation result, dropping
/// repositories with no qualifying commits. Repository order is
/// preserved.
pub fn merge_all(result: &AggregatedResult) -> Vec<RepositoryReport> {
    result
        .iter()
        .filter_map(|branches| merge_repository(branches))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Commit, CommitAuthor, CommitDetail, CommitParent};

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
                message: format!("commit {}", sha),
            },
            url: format!("https://api.github.com/repos/alice/r1/commits/{}", sha),
        }
    }

    fn branch_commits(repository: &str, branch: &str, commits: Vec<Commit>) -> BranchCommits {
        BranchCommits {
            repository: repository.to_string(),
            branch: branch.to_string(),
            commits,
        }
    }

    #[test]
    fn test_duplicate_sha_first_branch_wins() {
        let branches = vec![
            branch_commits("r1", "main", vec![commit("a1", 1)]),
            branch_commits("r1", "dev", vec![commit("a1", 1), commit("a3", 0)]),
        ];

        let report = merge_repository(&branches).unwrap();
        assert_eq!(report.commits.len(), 2);
        assert_eq!(report.commits[0].sha, "a1");
        assert_eq!(report.commits[1].sha, "a3");
    }

    #[test]
    fn test_merge_commits_excluded() {
        // A merge commit never appears, even alone on a branch
        let branches = vec![branch_commits("r1", "main", vec![commit("m1", 2)])];
        assert!(merge_repository(&branches).is_none());
    }

    #[test]
    fn test_empty_repository_suppressed() {
        let branches = vec![
            branch_commits("r1", "main", vec![]),
            branch_commits("r1", "dev", vec![]),
        ];
        assert!(merge_repository(&branches).is_none());
        assert!(merge_repository(&[]).is_none());
    }

    #[test]
    fn test_branch_with_only_duplicates_still_listed() {
        // dev contributes no new commit but is non-empty, so it counts
        // as a branch where commits occurred
        let branches = vec![
            branch_commits("r1", "main", vec![commit("a1", 0)]),
            branch_commits("r1", "dev", vec![commit("a1", 0)]),
        ];

        let report = merge_repository(&branches).unwrap();
        assert_eq!(report.branches, vec!["main", "dev"]);
        assert_eq!(report.commits.len(), 1);
    }

    #[test]
    fn test_spec_scenario() {
        // main = [a1, a2 (merge)], dev = [a1, a3]
        let branches = vec![
            branch_commits("r1", "main", vec![commit("a1", 0), commit("a2", 2)]),
            branch_commits("r1", "dev", vec![commit("a1", 0), commit("a3", 0)]),
        ];

        let report = merge_repository(&branches).unwrap();
        assert_eq!(report.repository, "r1");
        assert_eq!(report.branches, vec!["main", "dev"]);
        let shas: Vec<&str> = report.commits.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["a1", "a3"]);
    }

    #[test]
    fn test_merge_all_drops_empty_repositories() {
        let result: AggregatedResult = vec![
            vec![branch_commits("r1", "main", vec![commit("a1", 0)])],
            vec![branch_commits("r2", "main", vec![])],
            vec![branch_commits("r3", "main", vec![commit("b1", 0)])],
        ];

        let reports = merge_all(&result);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].repository, "r1");
        assert_eq!(reports[1].repository, "r3");
    }
}
