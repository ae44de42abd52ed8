use crate::core::constants::{PLACEHOLDER_TOKEN, TOKEN_MARKER, TOKEN_QUERY_KEY};
use reqwest::Url;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("tile service token is missing or still the placeholder")]
    Missing,
}

/// Message shown to a person when a session cannot start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub message: &'static str,
}

impl TokenError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Missing => Notice {
                title: "Missing Token",
                message: "You need to add your own Maptiler token.\nYou can't use mine.",
            },
        }
    }
}

/// A token that passed [`validate_token`].
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials, keep them out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"***").finish()
    }
}

/// Reject empty tokens and the sample placeholder.
pub fn validate_token(token: &str) -> Result<AuthToken, TokenError> {
    if token.is_empty() || token == PLACEHOLDER_TOKEN {
        return Err(TokenError::Missing);
    }
    Ok(AuthToken(token.to_string()))
}

pub fn build_rewrite_rule(token: &AuthToken) -> UrlRewriteRule {
    UrlRewriteRule::new(token.clone())
}

/// Injects the auth token into every remote URL the engine requests.
///
/// * `file:` URLs are returned untouched.
/// * URLs containing the `MapTilerKey` marker get the marker replaced.
/// * Any other URL gets exactly one `key=<token>` query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRewriteRule {
    token: AuthToken,
}

impl UrlRewriteRule {
    pub fn new(token: AuthToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    pub fn rewrite(&self, url: &Url) -> Url {
        if url.scheme() == "file" {
            return url.clone();
        }

        if url.as_str().contains(TOKEN_MARKER) {
            let replaced = url.as_str().replace(TOKEN_MARKER, self.token.as_str());
            match Url::parse(&replaced) {
                Ok(rewritten) => return rewritten,
                Err(e) => {
                    log::warn!("token substitution produced an invalid URL ({}), appending key instead", e);
                }
            }
        }

        self.append_key(url)
    }

    /// String form of [`rewrite`](Self::rewrite). Unparseable input is returned as is.
    pub fn rewrite_str(&self, raw: &str) -> String {
        match Url::parse(raw) {
            Ok(url) => self.rewrite(&url).into(),
            Err(e) => {
                log::warn!("leaving unparseable URL {:?} untouched: {}", raw, e);
                raw.to_string()
            }
        }
    }

    fn append_key(&self, url: &Url) -> Url {
        let retained: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != TOKEN_QUERY_KEY)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut rewritten = url.clone();
        rewritten
            .query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(TOKEN_QUERY_KEY, self.token.as_str());
        rewritten
    }
}
