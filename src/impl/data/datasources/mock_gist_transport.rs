use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    data::models::gist_model::{GistFileContentModel, GistRequestModel, GistResponseModel},
    errors::{CloudPullFailed, CloudPushFailed},
};

use super::gist_datasource::GistTransport;

/// In-memory gist service recording every call as `(method, path)`.
#[derive(Default)]
pub(crate) struct MockGistTransport {
    gists: Mutex<HashMap<String, GistResponseModel>>,
    raw_files: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<(String, String)>>,
    fail_status: Mutex<Option<u16>>,
}

impl MockGistTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Makes every following call fail with the given HTTP status.
    pub(crate) fn fail_with(&self, status: u16) {
        *self.fail_status.lock().unwrap() = Some(status);
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn content_of(&self, gist_id: &str, file_name: &str) -> Option<String> {
        self.gists
            .lock()
            .unwrap()
            .get(gist_id)?
            .files
            .get(file_name)?
            .content
            .clone()
    }

    /// Seeds a remote document directly, bypassing the call log.
    pub(crate) fn insert_gist(&self, gist_id: &str, files: HashMap<String, GistFileContentModel>) {
        self.gists.lock().unwrap().insert(
            gist_id.to_string(),
            GistResponseModel {
                id: gist_id.to_string(),
                files,
            },
        );
    }

    pub(crate) fn insert_raw(&self, url: &str, content: &str) {
        self.raw_files
            .lock()
            .unwrap()
            .insert(url.to_string(), content.to_string());
    }

    fn record(&self, method: &str, path: String) -> Option<u16> {
        self.calls.lock().unwrap().push((method.to_string(), path));
        *self.fail_status.lock().unwrap()
    }

    fn store(&self, gist_id: String, body: &GistRequestModel) -> GistResponseModel {
        let files = body
            .files
            .iter()
            .map(|(name, file)| {
                (
                    name.clone(),
                    GistFileContentModel {
                        content: Some(file.content.clone()),
                        truncated: false,
                        raw_url: None,
                    },
                )
            })
            .collect();
        let gist = GistResponseModel { id: gist_id, files };
        self.gists
            .lock()
            .unwrap()
            .insert(gist.id.clone(), gist.clone());
        gist
    }
}

#[async_trait]
impl GistTransport for MockGistTransport {
    async fn create_gist(
        &self,
        _token: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        if let Some(status) = self.record("POST", "/gists".to_string()) {
            return Err(CloudPushFailed::new(status));
        }
        let id = format!("gist-{}", self.gists.lock().unwrap().len() + 1);
        Ok(self.store(id, body))
    }

    async fn update_gist(
        &self,
        _token: &str,
        gist_id: &str,
        body: &GistRequestModel,
    ) -> Result<GistResponseModel, ServerError> {
        if let Some(status) = self.record("PATCH", format!("/gists/{gist_id}")) {
            return Err(CloudPushFailed::new(status));
        }
        if !self.gists.lock().unwrap().contains_key(gist_id) {
            return Err(CloudPushFailed::new(404));
        }
        Ok(self.store(gist_id.to_string(), body))
    }

    async fn get_gist(
        &self,
        _token: &str,
        gist_id: &str,
    ) -> Result<GistResponseModel, ServerError> {
        if let Some(status) = self.record("GET", format!("/gists/{gist_id}")) {
            return Err(CloudPullFailed::new(status));
        }
        self.gists
            .lock()
            .unwrap()
            .get(gist_id)
            .cloned()
            .ok_or_else(|| CloudPullFailed::new(404))
    }

    async fn get_raw(&self, _token: &str, raw_url: &str) -> Result<String, ServerError> {
        if let Some(status) = self.record("GET", raw_url.to_string()) {
            return Err(CloudPullFailed::new(status));
        }
        self.raw_files
            .lock()
            .unwrap()
            .get(raw_url)
            .cloned()
            .ok_or_else(|| CloudPullFailed::new(404))
    }
}
