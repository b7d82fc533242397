//! Supabase (GoTrue) REST client implementing [`IdentityPort`].
//!
//! Only the calls the app needs are wired: signup, password grant, user
//! lookup and logout. The client keeps no session; callers hand in the access
//! token for the calls that need one.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use jams_core::config::AppConfig;
use jams_core::identity::{
    AuthError, AuthSession, AuthUser, Credentials, SignUpRequest, SignUpResponse, UserMetadata,
};
use jams_core::ports::IdentityPort;
use jams_core::security::SecretString;

const AUTH_PATH: &str = "/auth/v1";

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: &'a UserMetadata,
}

#[derive(Serialize)]
struct PasswordGrantBody<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct SupabaseAuthClient {
    http: Client,
    base_url: String,
    anon_key: SecretString,
}

impl SupabaseAuthClient {
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<SecretString>,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build identity HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        if config.supabase_url.is_empty() {
            anyhow::bail!("identity service URL is not configured");
        }
        Self::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            (config.request_timeout_secs > 0)
                .then(|| Duration::from_secs(config.request_timeout_secs)),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, AUTH_PATH, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
        bearer: Option<&str>,
    ) -> Result<Response, AuthError> {
        let request = self.http.post(self.endpoint(path)).query(query).json(body);
        self.send(request, bearer).await
    }

    async fn get(&self, path: &str, bearer: &str) -> Result<Response, AuthError> {
        let request = self.http.get(self.endpoint(path));
        self.send(request, Some(bearer)).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<Response, AuthError> {
        let mut request = request.header("apikey", self.anon_key.expose());
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response).await)
    }
}

#[async_trait]
impl IdentityPort for SupabaseAuthClient {
    async fn sign_up(&self, request: SignUpRequest) -> Result<SignUpResponse, AuthError> {
        let span = info_span!("infra.supabase.sign_up");
        async {
            let body = SignUpBody {
                email: &request.email,
                password: request.password.expose(),
                data: &request.metadata,
            };
            let response = self.post("/signup", &[], &body, None).await?;
            let status = response.status();
            let value: Value = read_json(response).await?;

            // With auto-confirm the service answers with a session, otherwise
            // with the bare user.
            let parsed = if value.get("access_token").is_some() {
                let session: AuthSession = decode(value, status)?;
                SignUpResponse {
                    user: session.user.clone(),
                    session: Some(session),
                }
            } else {
                let user_value = match value.get("user") {
                    Some(user) if user.is_object() => user.clone(),
                    _ => value,
                };
                let user: AuthUser = decode(user_value, status)?;
                SignUpResponse {
                    user,
                    session: None,
                }
            };

            debug!(
                user_id = %parsed.user.id,
                has_session = parsed.session.is_some(),
                "signup accepted"
            );
            Ok(parsed)
        }
        .instrument(span)
        .await
    }

    async fn sign_in_with_password(
        &self,
        credentials: Credentials,
    ) -> Result<AuthSession, AuthError> {
        let span = info_span!("infra.supabase.sign_in_with_password");
        async {
            let body = PasswordGrantBody {
                email: &credentials.email,
                password: credentials.password.expose(),
            };
            let response = self
                .post("/token", &[("grant_type", "password")], &body, None)
                .await?;
            let status = response.status();
            let session: AuthSession = decode(read_json(response).await?, status)?;

            debug!(user_id = %session.user.id, "password grant accepted");
            Ok(session)
        }
        .instrument(span)
        .await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let span = info_span!("infra.supabase.get_user");
        async {
            let response = self.get("/user", access_token).await?;
            let status = response.status();
            let user: AuthUser = decode(read_json(response).await?, status)?;

            debug!(user_id = %user.id, "access token accepted");
            Ok(user)
        }
        .instrument(span)
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let span = info_span!("infra.supabase.sign_out");
        async {
            match self
                .post("/logout", &[], &serde_json::json!({}), Some(access_token))
                .await
            {
                Ok(_) => Ok(()),
                // The token is already unknown to the service.
                Err(err) if matches!(err.status, 401 | 403 | 404) => {
                    debug!(status = err.status, "session already gone on the server");
                    Ok(())
                }
                Err(err) => Err(err),
            }
        }
        .instrument(span)
        .await
    }
}

async fn read_json(response: Response) -> Result<Value, AuthError> {
    let status = response.status();
    response.json::<Value>().await.map_err(|e| {
        AuthError::new(
            format!("invalid response from identity service: {e}"),
            status.as_u16(),
        )
    })
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, status: StatusCode) -> Result<T, AuthError> {
    serde_json::from_value(value).map_err(|e| {
        AuthError::new(
            format!("invalid response from identity service: {e}"),
            status.as_u16(),
        )
    })
}

async fn error_from_response(response: Response) -> AuthError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    AuthError::new(error_message(status, &body), status.as_u16())
}

/// Pick the human-readable message out of an error body. GoTrue has used
/// several shapes over time.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("identity service error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(server: &Server) -> SupabaseAuthClient {
        SupabaseAuthClient::new(server.url(), "anon-key", Some(Duration::from_secs(5))).unwrap()
    }

    fn sign_up_request() -> SignUpRequest {
        SignUpRequest {
            email: "john.doe@example.com".into(),
            password: "Password123!".into(),
            metadata: UserMetadata {
                name: "John Doe".into(),
                school: "University of Sydney".into(),
                phone_number: "0412345678".into(),
            },
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "john.doe@example.com".into(),
            password: "Password123!".into(),
        }
    }

    fn session_body() -> Value {
        json!({
            "access_token": "access-123",
            "refresh_token": "refresh-123",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {
                "id": "user-123",
                "email": "john.doe@example.com",
                "user_metadata": {"name": "John Doe"}
            }
        })
    }

    #[tokio::test]
    async fn sign_up_posts_metadata_as_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/signup")
            .match_header("apikey", "anon-key")
            .match_body(Matcher::Json(json!({
                "email": "john.doe@example.com",
                "password": "Password123!",
                "data": {
                    "name": "John Doe",
                    "school": "University of Sydney",
                    "phoneNumber": "0412345678"
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"id": "user-123", "email": "john.doe@example.com"}).to_string())
            .create_async()
            .await;

        let client = client(&server);
        let response = client.sign_up(sign_up_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.user.id, "user-123");
        assert!(response.session.is_none());
    }

    #[tokio::test]
    async fn sign_up_with_auto_confirm_returns_session() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(session_body().to_string())
            .create_async()
            .await;

        let client = client(&server);
        let response = client.sign_up(sign_up_request()).await.unwrap();

        assert_eq!(response.user.id, "user-123");
        assert_eq!(
            response.session.map(|session| session.access_token).as_deref(),
            Some("access-123")
        );
    }

    #[tokio::test]
    async fn sign_up_error_message_is_verbatim() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/signup")
            .with_status(422)
            .with_body(
                json!({"code": 422, "error_code": "user_already_exists", "msg": "User already registered"})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).sign_up(sign_up_request()).await.unwrap_err();

        assert_eq!(err.to_string(), "User already registered");
        assert_eq!(err.status, 422);
    }

    #[tokio::test]
    async fn password_grant_returns_session() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::UrlEncoded("grant_type".into(), "password".into()))
            .match_header("apikey", "anon-key")
            .match_body(Matcher::Json(json!({
                "email": "john.doe@example.com",
                "password": "Password123!"
            })))
            .with_status(200)
            .with_body(session_body().to_string())
            .create_async()
            .await;

        let client = client(&server);
        let session = client.sign_in_with_password(credentials()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.access_token, "access-123");
        assert_eq!(session.user.email.as_deref(), Some("john.doe@example.com"));
    }

    #[tokio::test]
    async fn password_grant_error_uses_error_description() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(
                json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})
                    .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server)
            .sign_in_with_password(credentials())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status, 400);
    }

    #[tokio::test]
    async fn get_user_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/auth/v1/user")
            .match_header("authorization", "Bearer access-123")
            .match_header("apikey", "anon-key")
            .with_status(200)
            .with_body(
                json!({
                    "id": "user-456",
                    "email": "authenticated@example.com",
                    "aud": "authenticated",
                    "user_metadata": {
                        "name": "Authenticated User",
                        "school": "Test School",
                        "phoneNumber": "0412345678"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let user = client(&server).get_user("access-123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(user.id, "user-456");
        assert_eq!(user.email.as_deref(), Some("authenticated@example.com"));
        assert_eq!(user.user_metadata["school"], "Test School");
    }

    #[tokio::test]
    async fn get_user_unauthenticated_keeps_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(401)
            .with_body(json!({"message": "User not authenticated"}).to_string())
            .create_async()
            .await;

        let err = client(&server).get_user("stale-token").await.unwrap_err();

        assert_eq!(err.to_string(), "User not authenticated");
        assert_eq!(err.status, 401);
    }

    #[tokio::test]
    async fn get_user_with_expired_token_keeps_message() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/auth/v1/user")
            .with_status(403)
            .with_body(
                json!({"code": 403, "error_code": "bad_jwt", "msg": "Session expired"}).to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).get_user("expired-token").await.unwrap_err();

        assert_eq!(err.to_string(), "Session expired");
        assert_eq!(err.status, 403);
    }

    #[tokio::test]
    async fn sign_out_sends_bearer_token() {
        let mut server = Server::new_async().await;
        let logout = server
            .mock("POST", "/auth/v1/logout")
            .match_header("authorization", "Bearer access-123")
            .match_header("apikey", "anon-key")
            .with_status(204)
            .create_async()
            .await;

        client(&server).sign_out("access-123").await.unwrap();

        logout.assert_async().await;
    }

    #[tokio::test]
    async fn sign_out_with_unknown_token_succeeds() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(404)
            .with_body(json!({"msg": "Session not found"}).to_string())
            .create_async()
            .await;

        assert!(client(&server).sign_out("gone-token").await.is_ok());
    }

    #[tokio::test]
    async fn sign_out_server_error_is_returned() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/v1/logout")
            .with_status(500)
            .with_body(json!({"msg": "Database error"}).to_string())
            .create_async()
            .await;

        let err = client(&server).sign_out("access-123").await.unwrap_err();
        assert_eq!(err.to_string(), "Database error");
    }

    #[tokio::test]
    async fn transport_failure_has_status_zero() {
        let client = SupabaseAuthClient::new(
            "http://127.0.0.1:1",
            "anon-key",
            Some(Duration::from_secs(1)),
        )
        .unwrap();

        let err = client.sign_in_with_password(credentials()).await.unwrap_err();

        assert!(err.is_transport());
        assert!(!err.message.is_empty());
    }

    #[test]
    fn error_message_prefers_known_keys_in_order() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_message(status, r#"{"message":"m","error":"e"}"#),
            "m"
        );
        assert_eq!(
            error_message(status, r#"{"error":"e","msg":"first"}"#),
            "first"
        );
        assert_eq!(error_message(status, r#"{"error":"e"}"#), "e");
        assert_eq!(error_message(status, "upstream timeout"), "upstream timeout");
        assert_eq!(error_message(status, ""), "Bad Request");
    }

    #[test]
    fn from_config_requires_url() {
        let config = AppConfig::empty();
        assert!(SupabaseAuthClient::from_config(&config).is_err());
    }
}
