use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use std::path::PathBuf;

use crate::{
    cache::SiteCache,
    http::HttpClient,
    provider::{ContentSource, GitHubSource},
    runtime::Runtime,
};

use super::paths::resolve_cache_dir;

pub const USER_AGENT: &str = "codium-site";

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct SiteOptions {
    pub cache_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    /// Development mode: prefer cached release data.
    pub dev: bool,
}

pub struct Config<R: Runtime, S: ContentSource> {
    pub cache: SiteCache<R>,
    pub source: S,
    pub dev: bool,
}

impl<R: Runtime> Config<R, GitHubSource> {
    pub fn new(runtime: R, options: SiteOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Ok(token) = runtime.env_var("GITHUB_TOKEN") {
            let mut auth_value = HeaderValue::from_str(&format!("token {}", token))?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!(
                "Using GITHUB_TOKEN for authentication: {}",
                mask_token(&token)
            );
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        let source = GitHubSource::new(HttpClient::new(client), options.api_url);
        let cache_dir = resolve_cache_dir(&runtime, options.cache_dir)?;

        Ok(Self {
            cache: SiteCache::new(runtime, cache_dir),
            source,
            dev: options.dev,
        })
    }
}

/// Keeps the first eight and last four characters of a token.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockito::{Matcher, Server};

    /// Helper function to verify Authorization header behavior
    /// - `token`: Some(token) to test with GITHUB_TOKEN set, None to test without
    async fn verify_authorization_header(token: Option<&str>) {
        // --- Setup MockRuntime ---

        let mut runtime = MockRuntime::new();
        let token_clone = token.map(|t| t.to_string());

        runtime
            .expect_env_var()
            .with(mockall::predicate::eq("GITHUB_TOKEN"))
            .returning(move |_| token_clone.clone().ok_or(std::env::VarError::NotPresent));

        // --- Create Mock Server ---

        let mut server = Server::new_async().await;

        let expected_header = match token {
            Some(t) => Matcher::Exact(format!("token {}", t)),
            None => Matcher::Missing,
        };

        let mock = server
            .mock("GET", "/repos/VSCodium/vscodium/contents/docs")
            .match_header("Authorization", expected_header)
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        // --- Execute ---

        let options = SiteOptions {
            cache_dir: Some(PathBuf::from("/tmp/unused")),
            api_url: Some(server.url()),
            dev: false,
        };
        let config = Config::new(runtime, options).unwrap();
        let pages = config.source.list_docs().await.unwrap();

        // --- Verify ---

        mock.assert_async().await;
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_config_new_with_github_token() {
        verify_authorization_header(Some("ghp_test_token_1234")).await;
    }

    #[tokio::test]
    async fn test_config_new_without_github_token() {
        verify_authorization_header(None).await;
    }

    #[test]
    fn test_config_default_cache_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));
        runtime
            .expect_current_dir()
            .returning(|| Ok(PathBuf::from("/srv/site")));

        let config = Config::new(runtime, SiteOptions::default()).unwrap();
        assert_eq!(config.cache.pages_path(), PathBuf::from("/srv/site/cache/pages.json"));
        assert!(!config.dev);
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("ghp_abcdefghijklmnop"), "ghp_abcd*********mnop");
        assert_eq!(mask_token("short"), "*********");
    }
}
