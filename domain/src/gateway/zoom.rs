//! Zoom REST API client for webinar directory and registrant management.
//!
//! This module provides an HTTP client for reading webinars and creating
//! registrants. Every call is authorized with the account-level bearer token
//! held by the shared token [`Manager`].

use crate::error::{config_error, DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::WebinarPlatform;
use crate::registration::{RegistrationRequest, RegistrationResult};
use crate::webinar::{Occurrence, WebinarSummary};
use crate::WebinarId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use log::*;
use meeting_auth::oauth::{token::Manager, Provider};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Webinar as returned by `GET /webinars/{webinarId}`; unused fields are dropped.
#[derive(Debug, Deserialize)]
struct ZoomWebinar {
    id: WebinarId,
    #[serde(default)]
    topic: String,
    /// Absent for webinars that are not recurring.
    #[serde(default)]
    occurrences: Vec<ZoomOccurrence>,
}

#[derive(Debug, Deserialize)]
struct ZoomOccurrence {
    occurrence_id: String,
    start_time: DateTime<Utc>,
    #[serde(default)]
    duration: u32,
}

/// Body of `POST /webinars/{webinarId}/registrants`.
#[derive(Debug, Serialize)]
struct CreateRegistrantRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreateRegistrantResponse {
    join_url: String,
}

impl From<ZoomWebinar> for WebinarSummary {
    fn from(webinar: ZoomWebinar) -> Self {
        Self {
            id: webinar.id,
            topic: webinar.topic,
            occurrences: webinar
                .occurrences
                .into_iter()
                .map(|occ| Occurrence {
                    occurrence_id: occ.occurrence_id,
                    start_time: occ.start_time,
                    duration_minutes: occ.duration,
                })
                .collect(),
        }
    }
}

/// Zoom API client
pub struct ZoomClient<P: Provider> {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<Manager<P>>,
}

impl<P: Provider> ZoomClient<P> {
    /// Create a new Zoom client.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client
    /// * `base_url` - API base URL, normally `https://api.zoom.us/v2`
    /// * `tokens` - The process-wide token cache
    pub fn new(client: reqwest::Client, base_url: &str, tokens: Arc<Manager<P>>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    /// Fetch one webinar and project it down to its directory entry.
    async fn get_webinar(
        &self,
        token: &SecretString,
        webinar_id: WebinarId,
    ) -> Result<WebinarSummary, Error> {
        let url = format!("{}/webinars/{}", self.base_url, webinar_id);

        debug!("Fetching Zoom webinar {webinar_id}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to fetch Zoom webinar {webinar_id}: {e:?}");
                Error::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            warn!("Zoom API {status} for webinar {webinar_id}: {body}");
            return Err(Error {
                source: Some(format!("Zoom API {status} for webinar {webinar_id}").into()),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Upstream {
                    webinar_id,
                    status: status.as_u16(),
                    body,
                }),
            });
        }

        let webinar: ZoomWebinar = response.json().await.map_err(|e| {
            warn!("Failed to parse Zoom webinar {webinar_id}: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                    "Invalid response from Zoom API".to_string(),
                )),
            }
        })?;

        Ok(webinar.into())
    }
}

#[async_trait]
impl<P: Provider + 'static> WebinarPlatform for ZoomClient<P> {
    async fn list_webinars(&self, ids: &[WebinarId]) -> Result<Vec<WebinarSummary>, Error> {
        if ids.is_empty() {
            warn!("No webinar IDs configured");
            return Err(config_error("WEBINAR_IDS missing"));
        }

        let token = self.tokens.get_valid_token().await?;

        // try_join_all keeps input order and stops at the first failure.
        let webinars = try_join_all(ids.iter().map(|id| self.get_webinar(&token, *id))).await?;

        info!("Fetched {} Zoom webinars", webinars.len());
        Ok(webinars)
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationResult, Error> {
        let token = self.tokens.get_valid_token().await?;
        let url = format!("{}/webinars/{}/registrants", self.base_url, request.webinar_id);

        let body = CreateRegistrantRequest {
            first_name: &request.first_name,
            last_name: &request.last_name,
            email: &request.email,
            phone: request.phone.as_deref(),
        };

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&body);
        if !request.occurrence_id.is_empty() {
            builder = builder.query(&[("occurrence_ids", request.occurrence_id.as_str())]);
        }

        debug!("Creating Zoom registrant for webinar {}", request.webinar_id);

        let response = builder.send().await.map_err(|e| {
            warn!("Failed to create Zoom registrant: {e:?}");
            Error::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            let registrant: CreateRegistrantResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Zoom registrant response: {e:?}");
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Zoom API".to_string(),
                    )),
                }
            })?;
            Ok(RegistrationResult::Joined {
                join_url: registrant.join_url,
            })
        } else {
            let error_text = response.text().await?;
            warn!("Zoom registrant rejected: {} - {}", status, error_text);
            Ok(RegistrationResult::Rejected {
                error_message: error_text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InternalErrorKind;
    use meeting_auth::oauth::providers::zoom::Provider as ZoomProvider;
    use mockito::{Matcher, Server, ServerGuard};

    const TOKEN_BODY: &str = r#"{"access_token":"tok-1","token_type":"bearer","expires_in":3600}"#;

    async fn setup_test_server() -> ServerGuard {
        Server::new_async().await
    }

    fn client_for(server: &ServerGuard) -> ZoomClient<ZoomProvider> {
        client_with_urls(
            &format!("{}/oauth/token", server.url()),
            &format!("{}/v2", server.url()),
        )
    }

    // A local address nothing listens on: bind an ephemeral port, then release it.
    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn client_with_urls(token_url: &str, base_url: &str) -> ZoomClient<ZoomProvider> {
        let http = reqwest::Client::new();
        let provider = ZoomProvider::new(
            "acct".to_string(),
            "client".to_string(),
            SecretString::new("secret".to_string()),
            token_url.to_string(),
            http.clone(),
        )
        .unwrap();
        ZoomClient::new(http, base_url, Arc::new(Manager::new(provider)))
    }

    async fn mock_token(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
        server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(TOKEN_BODY)
            .expect(hits)
            .create_async()
            .await
    }

    fn webinar_body(id: WebinarId, topic: &str) -> String {
        serde_json::json!({
            "id": id,
            "uuid": "abc==",
            "host_id": "h1",
            "topic": topic,
            "type": 9,
            "agenda": "ignored",
            "occurrences": [
                {"occurrence_id": "1700000000000", "start_time": "2026-11-02T17:00:00Z", "duration": 60, "status": "available"},
                {"occurrence_id": "1700600000000", "start_time": "2026-11-09T17:00:00Z", "duration": 45, "status": "available"}
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_list_webinars_projects_and_keeps_order() {
        let mut server = setup_test_server().await;
        let token = mock_token(&mut server, 1).await;
        let _a = server
            .mock("GET", "/v2/webinars/111")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body(webinar_body(111, "Intro"))
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/v2/webinars/222")
            .match_header("authorization", "Bearer tok-1")
            .with_status(200)
            .with_body(r#"{"id":222,"topic":"Single session","type":5}"#)
            .create_async()
            .await;

        let webinars = client_for(&server)
            .list_webinars(&[222, 111])
            .await
            .unwrap();

        token.assert_async().await;
        assert_eq!(webinars.len(), 2);
        assert_eq!(webinars[0].id, 222);
        assert!(webinars[0].occurrences.is_empty());
        assert_eq!(webinars[1].id, 111);
        assert_eq!(webinars[1].topic, "Intro");
        assert_eq!(
            webinars[1].occurrences[1],
            Occurrence {
                occurrence_id: "1700600000000".to_string(),
                start_time: "2026-11-09T17:00:00Z".parse().unwrap(),
                duration_minutes: 45,
            }
        );
    }

    #[tokio::test]
    async fn test_list_webinars_empty_ids_makes_no_calls() {
        let mut server = setup_test_server().await;
        let token = mock_token(&mut server, 0).await;

        let err = client_for(&server).list_webinars(&[]).await.unwrap_err();

        token.assert_async().await;
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        );
    }

    #[tokio::test]
    async fn test_list_webinars_fails_on_first_upstream_error() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let _a = server
            .mock("GET", "/v2/webinars/111")
            .with_status(200)
            .with_body(webinar_body(111, "Intro"))
            .create_async()
            .await;
        let _b = server
            .mock("GET", "/v2/webinars/222")
            .with_status(404)
            .with_body(r#"{"code":3001,"message":"Webinar does not exist: 222."}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_webinars(&[111, 222])
            .await
            .unwrap_err();

        match err.error_kind {
            DomainErrorKind::External(ExternalErrorKind::Upstream {
                webinar_id,
                status,
                body,
            }) => {
                assert_eq!(webinar_id, 222);
                assert_eq!(status, 404);
                assert!(body.contains("Webinar does not exist"));
            }
            other => panic!("Expected Upstream error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_webinars_auth_failure() {
        let mut server = setup_test_server().await;
        let _token = server
            .mock("POST", "/oauth/token")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"reason":"Invalid account_id","error":"invalid_request"}"#)
            .create_async()
            .await;
        let webinar = server
            .mock("GET", "/v2/webinars/111")
            .expect(0)
            .create_async()
            .await;

        let err = client_for(&server)
            .list_webinars(&[111])
            .await
            .unwrap_err();

        webinar.assert_async().await;
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Auth)
        );
    }

    #[tokio::test]
    async fn test_token_is_reused_across_calls() {
        let mut server = setup_test_server().await;
        let token = mock_token(&mut server, 1).await;
        let _a = server
            .mock("GET", "/v2/webinars/111")
            .with_status(200)
            .with_body(webinar_body(111, "Intro"))
            .expect(2)
            .create_async()
            .await;
        let _r = server
            .mock("POST", "/v2/webinars/111/registrants")
            .match_query(Matcher::Any)
            .with_status(201)
            .with_body(r#"{"join_url":"https://zoom.us/w/111?tk=abc"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.list_webinars(&[111]).await.unwrap();
        client.list_webinars(&[111]).await.unwrap();
        client.register(&registration_request()).await.unwrap();

        token.assert_async().await;
    }

    fn registration_request() -> RegistrationRequest {
        RegistrationRequest {
            webinar_id: 111,
            occurrence_id: "1700000000000".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_register_returns_join_url_verbatim() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let registrant = server
            .mock("POST", "/v2/webinars/111/registrants")
            .match_query(Matcher::UrlEncoded(
                "occurrence_ids".into(),
                "1700000000000".into(),
            ))
            .match_header("authorization", "Bearer tok-1")
            .match_body(Matcher::Json(serde_json::json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com"
            })))
            .with_status(201)
            .with_body(
                r#"{"registrant_id":"r1","id":111,"topic":"Intro","join_url":"https://us02web.zoom.us/w/111?tk=AbC-123.DEF&pwd=xyz"}"#,
            )
            .create_async()
            .await;

        let result = client_for(&server)
            .register(&registration_request())
            .await
            .unwrap();

        registrant.assert_async().await;
        assert_eq!(
            result,
            RegistrationResult::Joined {
                join_url: "https://us02web.zoom.us/w/111?tk=AbC-123.DEF&pwd=xyz".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_register_sends_phone_when_present() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let registrant = server
            .mock("POST", "/v2/webinars/111/registrants")
            .match_query(Matcher::Any)
            .match_body(Matcher::PartialJson(serde_json::json!({
                "phone": "+1 555 0100"
            })))
            .with_status(201)
            .with_body(r#"{"join_url":"https://zoom.us/w/111"}"#)
            .create_async()
            .await;

        let mut request = registration_request();
        request.phone = Some("+1 555 0100".to_string());
        client_for(&server).register(&request).await.unwrap();

        registrant.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_rejection_passes_body_through() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let _registrant = server
            .mock("POST", "/v2/webinars/111/registrants")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"message":"already registered"}"#)
            .create_async()
            .await;

        let result = client_for(&server)
            .register(&registration_request())
            .await
            .unwrap();

        assert_eq!(
            result,
            RegistrationResult::Rejected {
                error_message: r#"{"message":"already registered"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_register_malformed_success_is_an_error() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let _registrant = server
            .mock("POST", "/v2/webinars/111/registrants")
            .match_query(Matcher::Any)
            .with_status(201)
            .with_body(r#"{"registrant_id":"r1"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .register(&registration_request())
            .await
            .unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(
                "Invalid response from Zoom API".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_list_webinars_unreachable_api_is_network_error() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let client = client_with_urls(
            &format!("{}/oauth/token", server.url()),
            &format!("{}/v2", unreachable_url()),
        );

        let err = client.list_webinars(&[111]).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Network)
        );
    }

    #[tokio::test]
    async fn test_register_unreachable_api_is_network_error() {
        let mut server = setup_test_server().await;
        let _token = mock_token(&mut server, 1).await;
        let client = client_with_urls(
            &format!("{}/oauth/token", server.url()),
            &format!("{}/v2", unreachable_url()),
        );

        let err = client.register(&registration_request()).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Network)
        );
    }

    #[tokio::test]
    async fn test_unreachable_token_endpoint_is_network_error() {
        let url = unreachable_url();
        let client = client_with_urls(&format!("{url}/oauth/token"), &format!("{url}/v2"));

        let err = client.list_webinars(&[111]).await.unwrap_err();

        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Network)
        );
    }
}
