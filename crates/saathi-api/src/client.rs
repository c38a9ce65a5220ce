//! The configured request client.
//!
//! Every outgoing call carries the bearer token from the credential store
//! when one is present. A 401 response triggers exactly one silent refresh
//! followed by exactly one retry of the original request; a second 401, or
//! any refresh failure, escalates. There is no other retry policy anywhere
//! in the client: no backoff, no deduplication, no timeouts.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use saathi_shared::envelope::Envelope;
use saathi_shared::error::{ApiError, Result};

use crate::tokens::CredentialStore;
use crate::transport::{HttpTransport, Method, RawResponse, ReqwestTransport};

pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload {
    access_token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<CredentialStore>) -> Self {
        Self::with_transport(base_url, credentials, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(
        base_url: impl Into<String>,
        credentials: Arc<CredentialStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T> {
        let resp = self.execute(Method::Get, path, None).await?;
        decode(resp, fallback)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        fallback: &str,
    ) -> Result<T> {
        let resp = self.execute(Method::Post, path, Some(body)).await?;
        decode(resp, fallback)
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        fallback: &str,
    ) -> Result<T> {
        let resp = self.execute(Method::Put, path, Some(body)).await?;
        decode(resp, fallback)
    }

    /// POST where the response payload is irrelevant.
    pub async fn post_ack(&self, path: &str, body: &Value, fallback: &str) -> Result<()> {
        let resp = self.execute(Method::Post, path, Some(body)).await?;
        ack(resp, fallback)
    }

    /// DELETE where the response payload is irrelevant.
    pub async fn delete_ack(&self, path: &str, fallback: &str) -> Result<()> {
        let resp = self.execute(Method::Delete, path, None).await?;
        ack(resp, fallback)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        let bearer = self.credentials.access_token();

        let resp = self
            .transport
            .send(method, &url, bearer.as_deref(), body)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if resp.status != 401 {
            return Ok(resp);
        }

        // 401: one refresh, one retry. A 401 on the retried call propagates
        // without a second refresh.
        debug!(method = method.as_str(), path, "401 received, attempting token refresh");

        let Some(refresh) = self.credentials.refresh_token() else {
            warn!("No refresh token available, session is over");
            self.credentials.clear();
            return Err(ApiError::SessionExpired);
        };

        let access = self.refresh_access(&refresh).await?;

        let retried = self
            .transport
            .send(method, &url, Some(&access), body)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if retried.status == 401 {
            warn!(method = method.as_str(), path, "Retried request rejected again");
            return Err(ApiError::Unauthorized);
        }

        Ok(retried)
    }

    /// Exchange the refresh token for a new access token. Any failure on
    /// this path clears both tokens: this is the one place a network error
    /// forces a global logged-out transition.
    async fn refresh_access(&self, refresh: &str) -> Result<String> {
        let url = format!("{}/auth/refresh-token", self.base_url);
        let body = serde_json::json!({ "refreshToken": refresh });

        let outcome = self.transport.send(Method::Post, &url, None, Some(&body)).await;

        let payload = match outcome {
            Ok(resp) if resp.status < 400 => {
                serde_json::from_slice::<Envelope<RefreshPayload>>(&resp.body)
                    .ok()
                    .and_then(|env| env.into_result("").ok())
            }
            _ => None,
        };

        match payload {
            Some(p) => {
                self.credentials.store_access(&p.access_token);
                debug!("Access token refreshed");
                Ok(p.access_token)
            }
            None => {
                warn!("Token refresh rejected, clearing credentials");
                self.credentials.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }
}

fn decode<T: DeserializeOwned>(resp: RawResponse, fallback: &str) -> Result<T> {
    match serde_json::from_slice::<Envelope<T>>(&resp.body) {
        Ok(envelope) => envelope.into_result(fallback),
        // A gateway error page or an empty body carries no envelope; treat
        // error statuses as a plain failure with the generic fallback.
        Err(e) if resp.status >= 400 => {
            debug!(status = resp.status, error = %e, "Unparseable error body");
            Err(ApiError::Api(fallback.to_string()))
        }
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

fn ack(resp: RawResponse, fallback: &str) -> Result<()> {
    match serde_json::from_slice::<Envelope<Value>>(&resp.body) {
        Ok(envelope) => envelope.into_ack(fallback),
        Err(_) if resp.status < 400 => Ok(()),
        Err(_) => Err(ApiError::Api(fallback.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::transport::TransportError;

    /// Replays a fixed queue of responses and records every request.
    struct ScriptedTransport {
        responses: Mutex<VecDeque<RawResponse>>,
        log: Mutex<Vec<(Method, String, Option<String>)>>,
    }

    impl ScriptedTransport {
        fn new(responses: Vec<RawResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                log: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<(Method, String, Option<String>)> {
            self.log.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn send(
            &self,
            method: Method,
            url: &str,
            bearer: Option<&str>,
            _body: Option<&Value>,
        ) -> std::result::Result<RawResponse, TransportError> {
            self.log.lock().unwrap().push((
                method,
                url.to_string(),
                bearer.map(String::from),
            ));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Send("script exhausted".into()))
        }
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    fn client_with(
        responses: Vec<RawResponse>,
    ) -> (ApiClient, Arc<ScriptedTransport>, Arc<CredentialStore>) {
        let transport = Arc::new(ScriptedTransport::new(responses));
        let credentials = Arc::new(CredentialStore::in_memory());
        let client = ApiClient::with_transport(
            "https://api.test",
            Arc::clone(&credentials),
            transport.clone(),
        );
        (client, transport, credentials)
    }

    #[tokio::test]
    async fn test_bearer_attached_when_present() {
        let (client, transport, credentials) = client_with(vec![response(
            200,
            r#"{"success":true,"data":{"ok":true}}"#,
        )]);
        credentials.store_login("tok-1", "ref-1", &serde_json::json!({}));

        let _: Value = client.get("/profile/me", "failed").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].2.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_retries_once() {
        let (client, transport, credentials) = client_with(vec![
            response(401, r#"{"success":false,"message":"expired"}"#),
            response(200, r#"{"success":true,"data":{"accessToken":"tok-2"}}"#),
            response(200, r#"{"success":true,"data":{"ok":true}}"#),
        ]);
        credentials.store_login("tok-1", "ref-1", &serde_json::json!({}));

        let out: Value = client.get("/matches", "failed").await.unwrap();
        assert_eq!(out["ok"], true);

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].1, "https://api.test/auth/refresh-token");
        // retried call carries the fresh token
        assert_eq!(requests[2].2.as_deref(), Some("tok-2"));
        assert_eq!(credentials.access_token().as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_second_401_does_not_refresh_again() {
        let (client, transport, credentials) = client_with(vec![
            response(401, "{}"),
            response(200, r#"{"success":true,"data":{"accessToken":"tok-2"}}"#),
            response(401, "{}"),
        ]);
        credentials.store_login("tok-1", "ref-1", &serde_json::json!({}));

        let out: Result<Value> = client.get("/matches", "failed").await;
        assert!(matches!(out, Err(ApiError::Unauthorized)));

        // original + refresh + retry, and nothing more
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_clears_session() {
        let (client, transport, credentials) = client_with(vec![response(401, "{}")]);

        let out: Result<Value> = client.get("/matches", "failed").await;
        assert!(matches!(out, Err(ApiError::SessionExpired)));
        assert_eq!(transport.requests().len(), 1);
        assert!(credentials.access_token().is_none());
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_both_tokens() {
        let (client, _, credentials) = client_with(vec![
            response(401, "{}"),
            response(403, r#"{"success":false,"message":"refresh revoked"}"#),
        ]);
        credentials.store_login("tok-1", "ref-1", &serde_json::json!({}));

        let out: Result<Value> = client.get("/matches", "failed").await;
        assert!(matches!(out, Err(ApiError::SessionExpired)));
        assert!(credentials.access_token().is_none());
        assert!(credentials.refresh_token().is_none());
    }

    #[tokio::test]
    async fn test_server_message_surfaced_verbatim() {
        let (client, _, _) = client_with(vec![response(
            400,
            r#"{"success":false,"message":"Age must be at least 18"}"#,
        )]);

        let out: Result<Value> = client.get("/search", "Search failed").await;
        match out {
            Err(ApiError::Api(msg)) => assert_eq!(msg, "Age must be at least 18"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_uses_fallback() {
        let (client, _, _) = client_with(vec![response(502, "<html>Bad Gateway</html>")]);

        let out: Result<Value> = client.get("/search", "Search failed").await;
        match out {
            Err(ApiError::Api(msg)) => assert_eq!(msg, "Search failed"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
