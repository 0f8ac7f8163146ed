//! Filter pipeline
//!
//! Narrows the upstream list (already sorted most-recently-updated first)
//! stage by stage, truncates to the requested limit, then projects each
//! survivor into a [`ProjectSummary`].

use chrono::{DateTime, Utc};

use crate::params::FilterCriteria;
use crate::types::{ProjectSummary, UpstreamRepository};

impl FilterCriteria {
    /// Apply every stage, truncate, and project
    pub fn apply(&self, repos: Vec<UpstreamRepository>) -> Vec<ProjectSummary> {
        repos
            .into_iter()
            .filter(is_active)
            .filter(|repo| self.matches_language(repo))
            .filter(|repo| self.matches_topics(repo))
            .filter(|repo| self.within_size(repo))
            .filter(|repo| self.within_stars(repo))
            .filter(|repo| self.within_update_window(repo))
            .take(self.limit)
            .map(ProjectSummary::from)
            .collect()
    }

    /// Any requested language equals the repo language, ignoring case
    ///
    /// A repo without a language never matches a non-empty request.
    pub fn matches_language(&self, repo: &UpstreamRepository) -> bool {
        if self.languages.is_empty() {
            return true;
        }
        let Some(language) = repo.language.as_deref() else {
            return false;
        };
        let language = language.to_lowercase();
        self.languages
            .iter()
            .any(|wanted| wanted.to_lowercase() == language)
    }

    /// Every requested topic is present on the repo, ignoring case
    pub fn matches_topics(&self, repo: &UpstreamRepository) -> bool {
        if self.topics.is_empty() {
            return true;
        }
        let repo_topics: Vec<String> = repo
            .topics
            .iter()
            .flatten()
            .map(|topic| topic.to_lowercase())
            .collect();

        self.topics
            .iter()
            .all(|wanted| repo_topics.contains(&wanted.to_lowercase()))
    }

    pub fn within_size(&self, repo: &UpstreamRepository) -> bool {
        within(repo.size as f64, self.min_size, self.max_size)
    }

    pub fn within_stars(&self, repo: &UpstreamRepository) -> bool {
        within(repo.stargazers_count as f64, self.min_stars, self.max_stars)
    }

    /// Inclusive update window; an unset bound is open on that side
    ///
    /// A timestamp that does not parse is never outside the window.
    pub fn within_update_window(&self, repo: &UpstreamRepository) -> bool {
        if self.updated_since.is_none() && self.updated_until.is_none() {
            return true;
        }
        let Ok(updated_at) = repo.updated_at.parse::<DateTime<Utc>>() else {
            return true;
        };

        if self.updated_since.is_some_and(|since| updated_at < since) {
            return false;
        }
        if self.updated_until.is_some_and(|until| updated_at > until) {
            return false;
        }
        true
    }
}

/// Forks, archived and disabled repositories are never listed
pub fn is_active(repo: &UpstreamRepository) -> bool {
    !repo.fork && !repo.archived && !repo.disabled
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{parse_date, DEFAULT_LIMIT};

    fn repo(name: &str) -> UpstreamRepository {
        UpstreamRepository {
            name: name.to_string(),
            description: None,
            language: None,
            html_url: format!("https://github.com/octocat/{}", name),
            fork: false,
            archived: false,
            disabled: false,
            updated_at: "2024-06-01T00:00:00Z".to_string(),
            size: 0,
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            default_branch: "main".to_string(),
            topics: None,
        }
    }

    fn with_language(name: &str, language: Option<&str>) -> UpstreamRepository {
        UpstreamRepository {
            language: language.map(str::to_string),
            ..repo(name)
        }
    }

    fn with_topics(name: &str, topics: &[&str]) -> UpstreamRepository {
        UpstreamRepository {
            topics: Some(topics.iter().map(|t| t.to_string()).collect()),
            ..repo(name)
        }
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria {
            user: "octocat".to_string(),
            limit: DEFAULT_LIMIT,
            languages: Vec::new(),
            topics: Vec::new(),
            min_size: None,
            max_size: None,
            min_stars: None,
            max_stars: None,
            updated_since: None,
            updated_until: None,
        }
    }

    fn names(projects: &[ProjectSummary]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_drops_forks_archived_disabled() {
        let repos = vec![
            UpstreamRepository { fork: true, ..repo("forked") },
            UpstreamRepository { archived: true, ..repo("old") },
            UpstreamRepository { disabled: true, ..repo("off") },
            repo("normal"),
        ];
        let projects = criteria().apply(repos);
        assert_eq!(names(&projects), vec!["normal"]);
    }

    #[test]
    fn test_language_any_of_case_insensitive() {
        let repos = vec![
            with_language("a", Some("Go")),
            with_language("b", Some("go")),
            with_language("c", Some("Python")),
            with_language("d", None),
        ];
        let filter = FilterCriteria {
            languages: vec!["Go".to_string(), "Rust".to_string()],
            ..criteria()
        };
        assert_eq!(names(&filter.apply(repos)), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_language_set_keeps_everything() {
        let repos = vec![with_language("a", Some("Go")), with_language("b", None)];
        assert_eq!(criteria().apply(repos).len(), 2);
    }

    #[test]
    fn test_topics_all_of() {
        let repos = vec![
            with_topics("partial", &["cli"]),
            with_topics("full", &["CLI", "tool", "extra"]),
            repo("none"),
        ];
        let filter = FilterCriteria {
            topics: vec!["cli".to_string(), "tool".to_string()],
            ..criteria()
        };
        assert_eq!(names(&filter.apply(repos)), vec!["full"]);
    }

    #[test]
    fn test_size_and_star_bounds_inclusive() {
        let repos = vec![
            UpstreamRepository { size: 10, stargazers_count: 5, ..repo("small") },
            UpstreamRepository { size: 50, stargazers_count: 5, ..repo("edge") },
            UpstreamRepository { size: 100, stargazers_count: 5, ..repo("big") },
            UpstreamRepository { size: 50, stargazers_count: 1, ..repo("unloved") },
        ];
        let filter = FilterCriteria {
            min_size: Some(50.0),
            max_size: Some(100.0),
            min_stars: Some(5.0),
            max_stars: Some(5.0),
            ..criteria()
        };
        assert_eq!(names(&filter.apply(repos)), vec!["edge", "big"]);
    }

    #[test]
    fn test_updated_since() {
        let repos = vec![
            UpstreamRepository { updated_at: "2024-06-01T00:00:00Z".to_string(), ..repo("new") },
            UpstreamRepository { updated_at: "2023-12-31T00:00:00Z".to_string(), ..repo("old") },
        ];
        let filter = FilterCriteria {
            updated_since: parse_date(Some("2024-01-01")),
            ..criteria()
        };
        assert_eq!(names(&filter.apply(repos)), vec!["new"]);
    }

    #[test]
    fn test_update_window_both_bounds_inclusive() {
        let repos = vec![
            UpstreamRepository { updated_at: "2024-01-01T00:00:00Z".to_string(), ..repo("start") },
            UpstreamRepository { updated_at: "2024-02-01T00:00:00Z".to_string(), ..repo("end") },
            UpstreamRepository { updated_at: "2024-02-01T00:00:01Z".to_string(), ..repo("after") },
        ];
        let filter = FilterCriteria {
            updated_since: parse_date(Some("2024-01-01")),
            updated_until: parse_date(Some("2024-02-01")),
            ..criteria()
        };
        assert_eq!(names(&filter.apply(repos)), vec!["start", "end"]);
    }

    #[test]
    fn test_unparseable_timestamp_is_kept() {
        let repos = vec![UpstreamRepository {
            updated_at: "sometime".to_string(),
            ..repo("odd")
        }];
        let filter = FilterCriteria {
            updated_since: parse_date(Some("2024-01-01")),
            ..criteria()
        };
        assert_eq!(filter.apply(repos).len(), 1);
    }

    #[test]
    fn test_truncates_after_filtering() {
        let mut repos: Vec<UpstreamRepository> = (0..5)
            .map(|i| UpstreamRepository { fork: true, ..repo(&format!("fork{}", i)) })
            .collect();
        repos.extend((0..5).map(|i| repo(&format!("repo{}", i))));

        let filter = FilterCriteria { limit: 3, ..criteria() };
        assert_eq!(names(&filter.apply(repos)), vec!["repo0", "repo1", "repo2"]);
    }
}
