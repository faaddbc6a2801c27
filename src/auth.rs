use std::env;
use std::fmt;

use anyhow::{Context, Result};

pub const TOKEN_ENV: &str = "JIRADASH_TOKEN";
const KEYRING_SERVICE: &str = "jiradash";

/// How requests to the server are authorized. Jira Cloud pairs the account
/// email with an API token; Server/Data Center takes a personal access token.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { user: String, token: String },
    Bearer { token: String },
}

impl Credentials {
    pub fn new(user: Option<&str>, token: String) -> Self {
        match user.map(str::trim).filter(|user| !user.is_empty()) {
            Some(user) => Self::Basic {
                user: user.to_string(),
                token,
            },
            None => Self::Bearer { token },
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Bearer { .. } => "bearer",
        }
    }

    pub fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Basic { user, token } => request.basic_auth(user, Some(token)),
            Self::Bearer { token } => request.bearer_auth(token),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { user, .. } => write!(f, "Basic({user}, <redacted>)"),
            Self::Bearer { .. } => f.write_str("Bearer(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    Keyring,
    Prompt,
}

impl TokenSource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Env => "env",
            Self::Keyring => "keyring",
            Self::Prompt => "prompt",
        }
    }
}

/// Keyring account for one server and user. Two users on the same host keep
/// separate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSlot {
    account: String,
}

impl TokenSlot {
    pub fn for_server(server_url: &str, user: Option<&str>) -> Self {
        let host = url::Url::parse(server_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| server_url.trim().to_string());
        let account = match user.map(str::trim).filter(|user| !user.is_empty()) {
            Some(user) => format!("{}@{}", user, host),
            None => host,
        };
        Self { account }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(KEYRING_SERVICE, &self.account)
            .with_context(|| format!("Failed to open keyring entry for {}", self.account))
    }

    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    /// Returns whether a token was actually removed.
    pub fn clear(&self) -> Result<bool> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}

/// Environment first, then the keyring; prompts once and remembers the answer
/// when neither has a usable token.
pub fn resolve_credentials(
    server_url: &str,
    user: Option<&str>,
) -> Result<(Credentials, TokenSource)> {
    let slot = TokenSlot::for_server(server_url, user);
    let found = known_token(env::var(TOKEN_ENV).ok(), || slot.load())?;
    let (token, source) = match found {
        Some(found) => found,
        None => {
            let prompt = format!("Paste an API token for {}: ", slot.account());
            let token = normalize_token(&rpassword::prompt_password(prompt)?)
                .context("Token cannot be empty")?;
            slot.store(&token)?;
            (token, TokenSource::Prompt)
        }
    };
    Ok((Credentials::new(user, token), source))
}

fn known_token<F>(env_value: Option<String>, keyring: F) -> Result<Option<(String, TokenSource)>>
where
    F: FnOnce() -> Result<Option<String>>,
{
    if let Some(token) = env_value.as_deref().and_then(normalize_token) {
        return Ok(Some((token, TokenSource::Env)));
    }
    Ok(keyring()?
        .as_deref()
        .and_then(normalize_token)
        .map(|token| (token, TokenSource::Keyring)))
}

fn normalize_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use super::{Credentials, TokenSlot, TokenSource, known_token};

    fn authorization(credentials: &Credentials) -> String {
        let client = reqwest::Client::new();
        let request = credentials
            .authorize(client.get("https://example.atlassian.net/rest/api/2/myself"))
            .build()
            .expect("request builds");
        request.headers()[AUTHORIZATION]
            .to_str()
            .expect("ascii header")
            .to_string()
    }

    #[test]
    fn configured_user_selects_basic_auth() {
        let credentials = Credentials::new(Some(" me@example.com "), "secret".to_string());
        assert_eq!(credentials.scheme(), "basic");
        // base64("me@example.com:secret")
        assert_eq!(authorization(&credentials), "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0");
    }

    #[test]
    fn missing_or_blank_user_selects_bearer_auth() {
        for user in [None, Some(""), Some("   ")] {
            let credentials = Credentials::new(user, "pat-123".to_string());
            assert_eq!(credentials.scheme(), "bearer");
            assert_eq!(authorization(&credentials), "Bearer pat-123");
        }
    }

    #[test]
    fn debug_output_hides_token() {
        let basic = Credentials::new(Some("me"), "secret".to_string());
        let bearer = Credentials::new(None, "secret".to_string());
        assert_eq!(format!("{:?}", basic), "Basic(me, <redacted>)");
        assert!(!format!("{:?}", bearer).contains("secret"));
    }

    #[test]
    fn slot_account_combines_user_and_host() {
        let cloud = TokenSlot::for_server("https://example.atlassian.net/jira", Some("me@example.com"));
        let server = TokenSlot::for_server("https://jira.internal:8443", None);
        let odd = TokenSlot::for_server(" not a url ", Some(""));

        assert_eq!(cloud.account(), "me@example.com@example.atlassian.net");
        assert_eq!(server.account(), "jira.internal");
        assert_eq!(odd.account(), "not a url");
    }

    #[test]
    fn environment_token_skips_keyring() {
        let found = known_token(Some("  env-token\n".to_string()), || {
            panic!("keyring must not be read")
        })
        .expect("lookup succeeds");
        assert_eq!(found, Some(("env-token".to_string(), TokenSource::Env)));
    }

    #[test]
    fn blank_environment_falls_through_to_keyring() {
        let found = known_token(Some("   ".to_string()), || Ok(Some("kept".to_string())))
            .expect("lookup succeeds");
        assert_eq!(found, Some(("kept".to_string(), TokenSource::Keyring)));

        let empty = known_token(None, || Ok(Some(" \n".to_string()))).expect("lookup succeeds");
        assert_eq!(empty, None);
    }

    #[test]
    fn keyring_failure_is_reported() {
        let error = known_token(None, || Err(anyhow::anyhow!("locked keychain")))
            .expect_err("keyring error propagates");
        assert_eq!(error.to_string(), "locked keychain");
    }
}
