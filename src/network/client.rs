//! HTTP client wrapper - talks to the GoBarber API and decodes its responses

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{ProfileUpdate, Session, SignInCredentials, SignUpData, User};
use crate::network::credential::CredentialHolder;

/// Remote operations the client needs from the API
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// `POST /sessions`
    async fn create_session(&self, credentials: &SignInCredentials) -> Result<Session, ApiError>;

    /// `POST /users`
    async fn create_user(&self, data: &SignUpData) -> Result<User, ApiError>;

    /// `PUT /profile`, authorized with the current credential
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError>;
}

/// reqwest-backed API client
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    credential: CredentialHolder,
}

impl HttpApiClient {
    pub fn new(config: &Config, credential: CredentialHolder) -> Self {
        HttpApiClient {
            client: create_client(config.timeout()),
            base_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
            credential,
        }
    }

    /// Build a request against `path`, attaching the bearer credential if one is held
    fn build_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);

        let mut req_builder = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");

        if let Some(authorization) = self.credential.authorization() {
            req_builder = req_builder.header(AUTHORIZATION, authorization);
        }

        req_builder
    }

    /// Send a JSON body and decode a JSON answer
    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let result = self.build_request(method.clone(), path).json(body).send().await;
        let elapsed = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(%method, path, time_ms = elapsed, error = %e, "Request failed");
                return Err(self.transport_error(e));
            }
        };

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Request(format!("Error reading body: {}", e)))?;

        tracing::info!(%method, path, status, time_ms = elapsed, "Request completed");

        if !(200..300).contains(&status) {
            return Err(ApiError::from_status(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else if e.is_connect() {
            ApiError::Connect(e.to_string())
        } else {
            ApiError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn create_session(&self, credentials: &SignInCredentials) -> Result<Session, ApiError> {
        self.send_json(Method::POST, "/sessions", credentials).await
    }

    async fn create_user(&self, data: &SignUpData) -> Result<User, ApiError> {
        self.send_json(Method::POST, "/users", data).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.send_json(Method::PUT, "/profile", update).await
    }
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PasswordChange;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(credential: CredentialHolder) -> HttpApiClient {
        let config = Config {
            api_url: "http://api.test".into(),
            ..Config::default()
        };
        HttpApiClient::new(&config, credential)
    }

    #[test]
    fn test_request_without_credential_has_no_authorization() {
        let api = client(CredentialHolder::new());
        let request = api.build_request(Method::POST, "/sessions").build().unwrap();

        assert_eq!(request.url().as_str(), "http://api.test/sessions");
        assert_eq!(request.method(), &Method::POST);
        assert!(request.headers().get(AUTHORIZATION).is_none());
        assert_eq!(request.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_request_reads_credential_at_build_time() {
        let credential = CredentialHolder::new();
        let api = client(credential.clone());

        credential.set("abc123");
        let request = api.build_request(Method::PUT, "/profile").build().unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer abc123");

        credential.clear();
        let request = api.build_request(Method::PUT, "/profile").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    fn client_for(server: &MockServer, credential: CredentialHolder) -> HttpApiClient {
        let config = Config {
            api_url: server.uri(),
            ..Config::default()
        };
        HttpApiClient::new(&config, credential)
    }

    fn user_json() -> serde_json::Value {
        json!({
            "id": "u-1",
            "name": "Ana",
            "email": "ana@example.com",
            "avatar_url": null,
            "created_at": "2020-05-01T12:00:00.000Z"
        })
    }

    #[tokio::test]
    async fn test_create_session_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_json(json!({"email": "ana@example.com", "password": "123456"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token": "tok-1", "user": user_json()})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server, CredentialHolder::new());
        let session = api
            .create_session(&SignInCredentials::new("ana@example.com", "123456"))
            .await
            .unwrap();

        assert_eq!(session.token, "tok-1");
        assert_eq!(session.user.name, "Ana");
        assert_eq!(session.user.avatar_url, None);
    }

    #[tokio::test]
    async fn test_update_profile_sends_bearer_and_flat_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/profile"))
            .and(header("authorization", "Bearer tok-1"))
            .and(body_json(json!({
                "name": "Ana Maria",
                "email": "ana@example.com",
                "old_password": "123456",
                "password": "abcdef",
                "password_confirmation": "abcdef"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
            .expect(1)
            .mount(&server)
            .await;

        let credential = CredentialHolder::new();
        credential.set("tok-1");
        let api = client_for(&server, credential);

        let update = ProfileUpdate {
            name: "Ana Maria".into(),
            email: "ana@example.com".into(),
            password_change: Some(PasswordChange {
                old_password: "123456".into(),
                password: "abcdef".into(),
                password_confirmation: "abcdef".into(),
            }),
        };
        let user = api.update_profile(&update).await.unwrap();
        assert_eq!(user.id, "u-1");
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": "error",
                "message": "Incorrect email/password combination."
            })))
            .mount(&server)
            .await;

        let api = client_for(&server, CredentialHolder::new());
        let err = api
            .create_session(&SignInCredentials::new("ana@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        match err {
            ApiError::Status { message, .. } => {
                assert_eq!(message, "Incorrect email/password combination.")
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_undecodable_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let api = client_for(&server, CredentialHolder::new());
        let data = SignUpData {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: "123456".into(),
        };
        let err = api.create_user(&data).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let config = Config {
            // Port 9 (discard) on localhost is expected to refuse connections
            api_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..Config::default()
        };
        let api = HttpApiClient::new(&config, CredentialHolder::new());

        let err = api
            .create_session(&SignInCredentials::new("a@b.co", "secret"))
            .await
            .unwrap_err();
        assert!(err.status().is_none());
    }
}
