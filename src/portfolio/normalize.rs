use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

use super::model::{NO_DESCRIPTION, Portfolio, Profile, Repository, profile_url};
use crate::backend::{RawPayload, RawRepo};
use crate::error::PortfolioError;

/// Builds the view-model from an untyped backend payload.
///
/// `requested_handle` is used when the profile object carries no `login`.
/// Fails with [`PortfolioError::MalformedResponse`] when the payload does not
/// have the expected shape or no handle can be resolved.
pub fn normalize(payload: &Value, requested_handle: Option<&str>) -> Result<Portfolio, PortfolioError> {
    let raw = RawPayload::deserialize(payload)
        .map_err(|e| PortfolioError::malformed(format!("unexpected payload shape: {}", e)))?;
    normalize_payload(raw, requested_handle)
}

fn normalize_payload(
    raw: RawPayload,
    requested_handle: Option<&str>,
) -> Result<Portfolio, PortfolioError> {
    let handle = non_blank(raw.profile.login)
        .or_else(|| requested_handle.and_then(|h| non_blank(Some(h.to_string()))))
        .ok_or_else(|| PortfolioError::malformed("profile has no resolvable handle"))?;

    let mut seen = HashSet::new();
    let mut repositories = Vec::with_capacity(raw.repos.len());
    for (position, repo) in raw.repos.into_iter().enumerate() {
        let repository = normalize_repo(repo, &handle, position);
        if !seen.insert(repository.identifier.clone()) {
            return Err(PortfolioError::malformed(format!(
                "duplicate repository id {}",
                repository.identifier
            )));
        }
        repositories.push(repository);
    }

    let repo_count = raw
        .profile
        .public_repos
        .unwrap_or(repositories.len() as u64);

    let display_name = non_blank(raw.profile.name).unwrap_or_else(|| handle.clone());

    debug!(
        "Normalized {} with {} repositories",
        handle,
        repositories.len()
    );

    let profile = Profile {
        profile_url: profile_url(&handle),
        display_name,
        avatar_url: raw.profile.avatar_url,
        bio: non_blank(raw.profile.bio),
        location: non_blank(raw.profile.location),
        blog: non_blank(raw.profile.blog),
        repo_count,
        follower_count: raw.profile.followers,
        following_count: raw.profile.following,
        handle,
    };

    Ok(Portfolio {
        profile,
        repositories,
    })
}

fn normalize_repo(repo: RawRepo, handle: &str, position: usize) -> Repository {
    let identifier = match repo.id {
        Some(id) => id.to_string(),
        None => format!("{}#{}", handle, position),
    };

    Repository {
        identifier,
        name: repo.name,
        description: non_blank(repo.description).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        url: repo.html_url,
        star_count: repo.stars,
        fork_count: repo.forks.unwrap_or(0),
        primary_language: non_blank(repo.language),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use serde_json::json;

    fn octocat_payload() -> Value {
        json!({
            "profile": {
                "avatar_url": "https://avatars.githubusercontent.com/u/583231",
                "name": null,
                "bio": null,
                "followers": 5,
                "following": 2
            },
            "repos": [
                {"name": "hello-world", "description": "My first repo", "html_url": "https://github.com/octocat/hello-world", "stars": 10, "language": "Go"},
                {"name": "spoon-knife", "description": null, "html_url": "https://github.com/octocat/spoon-knife", "stars": 5, "language": "Python"},
                {"name": "linguist", "description": "", "html_url": "https://github.com/octocat/linguist", "stars": 0, "language": null}
            ]
        })
    }

    #[test]
    fn test_normalize_with_requested_handle() {
        let portfolio = normalize(&octocat_payload(), Some("octocat")).unwrap();

        let profile = &portfolio.profile;
        assert_eq!(profile.handle, "octocat");
        assert_eq!(profile.display_name, "octocat");
        assert_eq!(profile.repo_count, 3);
        assert_eq!(profile.follower_count, 5);
        assert_eq!(profile.following_count, 2);
        assert_eq!(profile.profile_url, "https://github.com/octocat");
        assert_eq!(profile.bio, None);

        let names: Vec<&str> = portfolio
            .repositories
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["hello-world", "spoon-knife", "linguist"]);
    }

    #[test]
    fn test_normalize_missing_optional_repo_fields() {
        let payload = json!({
            "profile": {"login": "octocat", "avatar_url": "a", "followers": 0, "following": 0},
            "repos": [{"name": "bare", "html_url": "https://github.com/octocat/bare", "stars": 3}]
        });

        let portfolio = normalize(&payload, None).unwrap();
        let repo = &portfolio.repositories[0];

        assert_eq!(repo.description, NO_DESCRIPTION);
        assert_eq!(repo.primary_language, None);
        assert_eq!(repo.fork_count, 0);
        assert_eq!(repo.star_count, 3);
    }

    #[test]
    fn test_normalize_blank_description_uses_placeholder() {
        let portfolio = normalize(&octocat_payload(), Some("octocat")).unwrap();
        assert_eq!(portfolio.repositories[1].description, NO_DESCRIPTION);
        assert_eq!(portfolio.repositories[2].description, NO_DESCRIPTION);
        assert_eq!(portfolio.repositories[0].description, "My first repo");
    }

    #[test]
    fn test_normalize_without_handle_fails() {
        let err = normalize(&octocat_payload(), None).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);

        let err = normalize(&octocat_payload(), Some("   ")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);
    }

    #[test]
    fn test_normalize_prefers_login_from_payload() {
        let mut payload = octocat_payload();
        payload["profile"]["login"] = json!("Octocat");

        let portfolio = normalize(&payload, Some("octocat")).unwrap();
        assert_eq!(portfolio.profile.handle, "Octocat");
        assert_eq!(portfolio.profile.profile_url, "https://github.com/Octocat");
    }

    #[test]
    fn test_normalize_uses_display_name() {
        let mut payload = octocat_payload();
        payload["profile"]["name"] = json!("The Octocat");
        payload["profile"]["bio"] = json!("  Mascot  ");

        let portfolio = normalize(&payload, Some("octocat")).unwrap();
        assert_eq!(portfolio.profile.display_name, "The Octocat");
        assert_eq!(portfolio.profile.bio.as_deref(), Some("Mascot"));
    }

    #[test]
    fn test_normalize_authoritative_repo_count() {
        let mut payload = octocat_payload();
        payload["profile"]["public_repos"] = json!(42);

        let portfolio = normalize(&payload, Some("octocat")).unwrap();
        assert_eq!(portfolio.profile.repo_count, 42);
        assert_eq!(portfolio.repositories.len(), 3);
    }

    #[test]
    fn test_normalize_identifiers() {
        let mut payload = octocat_payload();
        payload["repos"][0]["id"] = json!(1296269);

        let portfolio = normalize(&payload, Some("octocat")).unwrap();
        let ids: Vec<&str> = portfolio
            .repositories
            .iter()
            .map(|r| r.identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["1296269", "octocat#1", "octocat#2"]);
    }

    #[test]
    fn test_normalize_duplicate_ids_fail() {
        let mut payload = octocat_payload();
        payload["repos"][0]["id"] = json!(7);
        payload["repos"][1]["id"] = json!(7);

        let err = normalize(&payload, Some("octocat")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);
    }

    #[test]
    fn test_normalize_rejects_malformed_shapes() {
        let cases = [
            json!([]),
            json!({"repos": []}),
            json!({"profile": {"avatar_url": "a", "followers": 1, "following": 1}}),
            json!({"profile": {"avatar_url": "a", "followers": -1, "following": 1}, "repos": []}),
            json!({"profile": {"avatar_url": "a", "followers": 1, "following": 1}, "repos": [{"html_url": "u", "stars": 1}]}),
            json!({"profile": {"avatar_url": "a", "followers": 1, "following": 1}, "repos": [{"name": "n", "html_url": "u", "stars": "many"}]}),
        ];

        for payload in cases {
            let err = normalize(&payload, Some("octocat")).unwrap_err();
            assert_eq!(
                err.category(),
                ErrorCategory::MalformedResponse,
                "payload: {}",
                payload
            );
        }
    }

    #[test]
    fn test_normalize_empty_repos() {
        let payload = json!({
            "profile": {"avatar_url": "a", "followers": 0, "following": 0},
            "repos": []
        });

        let portfolio = normalize(&payload, Some("newbie")).unwrap();
        assert!(portfolio.repositories.is_empty());
        assert_eq!(portfolio.profile.repo_count, 0);
    }
}
