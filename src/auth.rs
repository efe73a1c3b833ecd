//! Session handling: exchanging credentials for a bearer token.

use std::env;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::Backend;
use crate::api::envelope::parse_data;
use crate::config::{Config, TOKEN_ENV};
use crate::error::{ConsoleError, Result};
use crate::i18n::{BilingualMessage, text};

pub const LOGIN_PATH: &str = "api/Auth/login";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "jwt")]
    token: String,
    #[serde(default)]
    full_name: Option<String>,
}

/// A freshly issued session
#[derive(Debug)]
pub struct Session {
    pub token: SecretString,
    pub display_name: Option<String>,
}

/// Where the active token comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// `ROSTER_TOKEN` is set and takes precedence
    Environment,
    ConfigFile,
    LoggedOut,
}

/// Exchange credentials for a token.
///
/// Blank credentials are rejected before any request is made.
pub async fn login<B: Backend>(backend: &B, email: &str, password: &SecretString) -> Result<Session> {
    let email = email.trim();
    if email.is_empty() || password.expose_secret().is_empty() {
        return Err(ConsoleError::validation(BilingualMessage::from_text(
            text::CREDENTIALS_REQUIRED,
        )));
    }

    let body = serde_json::to_value(LoginRequest {
        email,
        password: password.expose_secret(),
    })?;
    let data = backend.post(LOGIN_PATH, &body).await?;
    let response: LoginResponse = parse_login(data)?;

    if response.token.trim().is_empty() {
        return Err(ConsoleError::InvalidInput(
            "login response did not contain a token".into(),
        ));
    }

    tracing::debug!("logged in as {email}");
    Ok(Session {
        token: SecretString::from(response.token),
        display_name: response.full_name,
    })
}

/// Some deployments return the token as a bare string payload.
fn parse_login(data: Value) -> Result<LoginResponse> {
    match data {
        Value::String(token) => Ok(LoginResponse {
            token,
            full_name: None,
        }),
        other => parse_data(other),
    }
}

/// Store the session token in `config` and save it.
pub fn store_session(config: &mut Config, session: &Session) -> Result<()> {
    config.set_token(session.token.expose_secret().to_string());
    config.save()
}

/// Forget the stored token. Returns whether one was stored.
pub fn logout(config: &mut Config) -> Result<bool> {
    let had_token = config.auth.token.is_some();
    config.clear_token();
    config.save()?;
    Ok(had_token)
}

pub fn status(config: &Config) -> AuthStatus {
    match env::var(TOKEN_ENV) {
        Ok(token) if !token.is_empty() => AuthStatus::Environment,
        _ if config.auth.token.is_some() => AuthStatus::ConfigFile,
        _ => AuthStatus::LoggedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::query::QueryParams;
    use serde_json::json;
    use serial_test::serial;
    use std::sync::Mutex;

    struct StubBackend {
        reply: Value,
        posts: Mutex<Vec<(String, Value)>>,
    }

    impl StubBackend {
        fn new(reply: Value) -> Self {
            Self {
                reply,
                posts: Mutex::new(Vec::new()),
            }
        }
    }

    impl Backend for StubBackend {
        async fn get(&self, _path: &str, _params: &QueryParams) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn post(&self, path: &str, body: &Value) -> Result<Value> {
            self.posts
                .lock()
                .unwrap()
                .push((path.to_string(), body.clone()));
            Ok(self.reply.clone())
        }

        async fn delete(&self, _path: &str, _body: &Value) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let backend = StubBackend::new(json!({ "token": "abc", "fullName": "Sara" }));
        let session = login(&backend, " sara@example.com ", &SecretString::from("pw"))
            .await
            .unwrap();

        assert_eq!(session.token.expose_secret(), "abc");
        assert_eq!(session.display_name.as_deref(), Some("Sara"));

        let posts = backend.posts.lock().unwrap();
        assert_eq!(posts[0].0, LOGIN_PATH);
        assert_eq!(posts[0].1, json!({ "email": "sara@example.com", "password": "pw" }));
    }

    #[tokio::test]
    async fn test_login_accepts_bare_token() {
        let backend = StubBackend::new(json!("xyz"));
        let session = login(&backend, "a@b.c", &SecretString::from("pw")).await.unwrap();
        assert_eq!(session.token.expose_secret(), "xyz");
    }

    #[tokio::test]
    async fn test_session_debug_hides_token() {
        let backend = StubBackend::new(json!({ "token": "very-secret-jwt", "fullName": "Sara" }));
        let session = login(&backend, "a@b.c", &SecretString::from("pw")).await.unwrap();
        let shown = format!("{session:?}");
        assert!(!shown.contains("very-secret-jwt"));
        assert!(shown.contains("Sara"));
    }

    #[tokio::test]
    async fn test_blank_credentials_not_sent() {
        let backend = StubBackend::new(json!({ "token": "abc" }));
        let err = login(&backend, "  ", &SecretString::from("pw")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = login(&backend, "a@b.c", &SecretString::from("")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(backend.posts.lock().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_status_sources() {
        unsafe { env::remove_var(TOKEN_ENV) };
        let mut config = Config::default();
        assert_eq!(status(&config), AuthStatus::LoggedOut);

        config.set_token("t".into());
        assert_eq!(status(&config), AuthStatus::ConfigFile);

        unsafe { env::set_var(TOKEN_ENV, "env-token") };
        assert_eq!(status(&config), AuthStatus::Environment);
        unsafe { env::remove_var(TOKEN_ENV) };
    }

    #[test]
    #[serial]
    fn test_logout_clears_saved_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        unsafe { env::set_var(crate::config::CONFIG_ENV, &path) };

        let mut config = Config::default();
        config.set_token("t".into());
        config.save().unwrap();

        assert!(logout(&mut config).unwrap());
        assert!(Config::load().unwrap().auth.token.is_none());
        assert!(!logout(&mut config).unwrap());

        unsafe { env::remove_var(crate::config::CONFIG_ENV) };
    }
}
