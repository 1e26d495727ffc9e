use serde::Serialize;

/// Shown in place of a missing repository description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Canonical GitHub page for a handle.
pub fn profile_url(handle: &str) -> String {
    format!("https://github.com/{}", handle)
}

/// Identity and summary counters of a GitHub account.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub handle: String,
    /// Human name, or the handle when the account has none.
    pub display_name: String,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    /// Authoritative count from the backend, else the number of fetched repositories.
    pub repo_count: u64,
    pub follower_count: u64,
    pub following_count: u64,
    pub profile_url: String,
}

/// One repository as it is displayed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Unique within one fetch result only.
    pub identifier: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub star_count: u64,
    pub fork_count: u64,
    pub primary_language: Option<String>,
}

/// A profile with its repositories, in backend order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Portfolio {
    pub profile: Profile,
    pub repositories: Vec<Repository>,
}
