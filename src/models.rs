use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A GitHub account as returned by the `/users/{username}` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "login")]
    pub username: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub name: Option<String>,
    pub avatar_url: String,
    #[serde(rename = "html_url")]
    pub github_page: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub company: Option<String>,
    #[serde(rename = "blog", default, deserialize_with = "non_empty")]
    pub website: Option<String>,
    #[serde(rename = "twitter_username", default, deserialize_with = "non_empty")]
    pub social_handle: Option<String>,
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub repos_url: String,
    pub followers_url: String,
    pub following_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    User,
    Organization,
    #[serde(other)]
    Other,
}

/// A repository entry from a `repos_url` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub html_url: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(rename = "private", default)]
    pub is_private: bool,
    #[serde(default, deserialize_with = "non_empty")]
    pub language: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    #[serde(rename = "fork", default)]
    pub is_fork: bool,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One entry of a followers or following listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntry {
    #[serde(rename = "login")]
    pub username: String,
    pub avatar_url: String,
    /// API url of the user, used to load their profile
    #[serde(rename = "url")]
    pub profile_url: String,
}

impl fmt::Display for UserEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

/// GitHub sends `""` as often as `null` for unset profile fields.
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_treats_blank_fields_as_absent() {
        let profile: Profile = serde_json::from_value(json!({
            "login": "octocat",
            "name": "The Octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
            "html_url": "https://github.com/octocat",
            "bio": null,
            "location": "San Francisco",
            "company": "",
            "blog": "https://github.blog",
            "twitter_username": null,
            "type": "User",
            "public_repos": 8,
            "followers": 17000,
            "following": 9,
            "repos_url": "https://api.github.com/users/octocat/repos",
            "followers_url": "https://api.github.com/users/octocat/followers",
            "following_url": "https://api.github.com/users/octocat/following{/other_user}"
        }))
        .unwrap();

        assert_eq!(profile.username, "octocat");
        assert_eq!(profile.bio, None);
        assert_eq!(profile.company, None);
        assert_eq!(profile.location.as_deref(), Some("San Francisco"));
        assert_eq!(profile.account_type, AccountType::User);
    }

    #[test]
    fn test_unknown_account_type() {
        let kind: AccountType = serde_json::from_value(json!("Bot")).unwrap();
        assert_eq!(kind, AccountType::Other);
    }

    #[test]
    fn test_repository_fields() {
        let repo: Repository = serde_json::from_value(json!({
            "name": "hello-world",
            "html_url": "https://github.com/octocat/hello-world",
            "description": "My first repository",
            "private": false,
            "language": null,
            "stargazers_count": 2500,
            "forks_count": 12,
            "fork": true
        }))
        .unwrap();

        assert_eq!(repo.to_string(), "hello-world");
        assert!(repo.is_fork);
        assert_eq!(repo.language, None);
        assert_eq!(repo.stars, 2500);
    }
}
