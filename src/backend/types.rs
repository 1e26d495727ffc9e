use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response body of `GET /api/v1/github/{handle}`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawPayload {
    pub profile: RawProfile,
    pub repos: Vec<RawRepo>,
}

/// Profile object inside [`RawPayload`]. Only the counters and the avatar are required.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawProfile {
    #[serde(default)]
    pub login: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    pub followers: u64,
    pub following: u64,
}

/// One repository record inside [`RawPayload`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RawRepo {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub html_url: String,
    #[serde(alias = "stargazers_count")]
    pub stars: u64,
    #[serde(default, alias = "forks_count")]
    pub forks: Option<u64>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `POST /api/v1/portfolio`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SaveRequest<'a> {
    pub github_username: &'a str,
    pub data: &'a Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_repo_accepts_github_field_names() {
        let repo: RawRepo = serde_json::from_str(
            r#"{
                "name": "hello",
                "html_url": "https://github.com/octocat/hello",
                "stargazers_count": 7,
                "forks_count": 2
            }"#,
        )
        .unwrap();

        assert_eq!(repo.stars, 7);
        assert_eq!(repo.forks, Some(2));
        assert_eq!(repo.language, None);
        assert_eq!(repo.id, None);
    }

    #[test]
    fn test_raw_repo_rejects_negative_stars() {
        let result = serde_json::from_str::<RawRepo>(
            r#"{"name": "x", "html_url": "u", "stars": -1}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_profile_nullable_fields() {
        let profile: RawProfile = serde_json::from_str(
            r#"{
                "avatar_url": "https://avatars.example/1",
                "name": null,
                "bio": null,
                "followers": 5,
                "following": 2
            }"#,
        )
        .unwrap();

        assert_eq!(profile.login, None);
        assert_eq!(profile.name, None);
        assert_eq!(profile.public_repos, None);
        assert_eq!(profile.followers, 5);
    }

    #[test]
    fn test_save_request_shape() {
        let data = serde_json::json!({"profile": {}, "repos": []});
        let body = SaveRequest {
            github_username: "octocat",
            data: &data,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"github_username": "octocat", "data": {"profile": {}, "repos": []}})
        );
    }
}
