use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use fractic_server_error::ServerError;
use reqwest::{header::ACCEPT, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    config::SpendwiseConfig,
    data::models::gist_model::{GistRequestModel, GistResponseModel},
    errors::{CloudPullFailed, CloudPushFailed, CloudRequestFailed, CloudResponseMalformed},
};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Remote single-document store addressed by gist id.
///
/// Any non-2xx response is an error; implementations do not retry.
#[async_trait]
pub trait GistTransport: Send + Sync {
    /// `POST /gists`
    async fn create_gist(
        &self,
        token: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError>;

    /// `PATCH /gists/{gist_id}`
    async fn update_gist(
        &self,
        token: &str,
        gist_id: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError>;

    /// `GET /gists/{gist_id}`
    async fn get_gist(&self, token: &str, gist_id: &str)
        -> Result<GistResponseModel, ServerError>;

    /// Full text of a file the API returned truncated.
    async fn get_raw(&self, token: &str, raw_url: &str) -> Result<String, ServerError>;
}

#[async_trait]
impl<T: GistTransport + ?Sized> GistTransport for Arc<T> {
    async fn create_gist(
        &self,
        token: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        (**self).create_gist(token, body).await
    }

    async fn update_gist(
        &self,
        token: &str,
        gist_id: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        (**self).update_gist(token, gist_id, body).await
    }

    async fn get_gist(
        &self,
        token: &str,
        gist_id: &str,
    ) -> Result<GistResponseModel, ServerError> {
        (**self).get_gist(token, gist_id).await
    }

    async fn get_raw(&self, token: &str, raw_url: &str) -> Result<String, ServerError> {
        (**self).get_raw(token, raw_url).await
    }
}

pub struct GistHttpDatasource {
    client: Client,
    base_url: String,
}

impl GistHttpDatasource {
    pub fn new(config: &SpendwiseConfig) -> Result<Self, ServerError> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| CloudRequestFailed::with_debug(&e))?;
        Ok(Self::with_client(client, &config.gist_api_base))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(request: RequestBuilder, token: &str) -> Result<Response, ServerError> {
        request
            .bearer_auth(token)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| CloudRequestFailed::with_debug(&e))
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ServerError> {
        response
            .json::<T>()
            .await
            .map_err(|e| CloudResponseMalformed::with_debug(&e))
    }

    async fn push(
        &self,
        request: RequestBuilder,
        token: &str,
    ) -> Result<GistResponseModel, ServerError> {
        let response = Self::send(request, token).await?;
        if !response.status().is_success() {
            return Err(CloudPushFailed::new(response.status().as_u16()));
        }
        Self::parse(response).await
    }
}

#[async_trait]
impl GistTransport for GistHttpDatasource {
    async fn create_gist(
        &self,
        token: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        self.push(self.client.post(self.url("/gists")).json(body), token)
            .await
    }

    async fn update_gist(
        &self,
        token: &str,
        gist_id: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        self.push(
            self.client
                .patch(self.url(&format!("/gists/{gist_id}")))
                .json(body),
            token,
        )
        .await
    }

    async fn get_gist(
        &self,
        token: &str,
        gist_id: &str,
    ) -> Result<GistResponseModel, ServerError> {
        let response =
            Self::send(self.client.get(self.url(&format!("/gists/{gist_id}"))), token).await?;
        if !response.status().is_success() {
            return Err(CloudPullFailed::new(response.status().as_u16()));
        }
        Self::parse(response).await
    }

    async fn get_raw(&self, token: &str, raw_url: &str) -> Result<String, ServerError> {
        let response = Self::send(self.client.get(raw_url), token).await?;
        if !response.status().is_success() {
            return Err(CloudPullFailed::new(response.status().as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| CloudResponseMalformed::with_debug(&e))
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt as _, AsyncWriteExt as _},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    /// Accepts one connection, answers with the given status and body, and
    /// yields the raw request text.
    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= head_end + 4 + content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&buf).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn datasource(base_url: &str) -> GistHttpDatasource {
        let client = Client::builder().no_proxy().build().unwrap();
        GistHttpDatasource::with_client(client, base_url)
    }

    #[tokio::test]
    async fn test_create_posts_to_gists() {
        let (base, server) = serve_once(201, r#"{"id":"new-gist","files":{}}"#).await;
        let body = GistRequestModel::single_file("backup", "spendwise_db.json", "{}");

        let response = datasource(&base).create_gist("tok", &body).await.unwrap();
        assert_eq!(response.id, "new-gist");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /gists HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer tok"));
        assert!(request.contains(r#""public":false"#));
    }

    #[tokio::test]
    async fn test_update_patches_by_id() {
        let (base, server) = serve_once(200, r#"{"id":"g1"}"#).await;
        let body = GistRequestModel::single_file("backup", "spendwise_db.json", "{}");

        datasource(&base).update_gist("tok", "g1", &body).await.unwrap();
        assert!(server.await.unwrap().starts_with("PATCH /gists/g1 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_non_success_is_error() {
        let (base, _server) = serve_once(401, r#"{"message":"Bad credentials"}"#).await;
        assert!(datasource(&base).get_gist("bad", "g1").await.is_err());

        let (base, _server) = serve_once(422, r#"{"message":"Validation Failed"}"#).await;
        let body = GistRequestModel::single_file("backup", "spendwise_db.json", "{}");
        assert!(datasource(&base).create_gist("tok", &body).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let (base, _server) = serve_once(200, r#"{"unexpected":true}"#).await;
        assert!(datasource(&base).get_gist("tok", "g1").await.is_err());
    }
}
