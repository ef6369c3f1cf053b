use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    config::SpendwiseConfig,
    data::{
        datasources::gist_datasource::{GistHttpDatasource, GistTransport},
        models::gist_model::GistRequestModel,
    },
    domain::repositories::cloud_repository::CloudRepository,
    entities::CloudConfig,
    errors::RemoteFileMissing,
};

pub(crate) struct CloudRepositoryImpl<T: GistTransport = GistHttpDatasource> {
    transport: T,
    file_name: String,
    description: String,
}

impl<T: GistTransport> CloudRepositoryImpl<T> {
    pub(crate) fn new(transport: T, config: &SpendwiseConfig) -> Self {
        Self {
            transport,
            file_name: config.gist_file_name.clone(),
            description: config.gist_description.clone(),
        }
    }
}

#[async_trait]
impl<T: GistTransport> CloudRepository for CloudRepositoryImpl<T> {
    async fn push(&self, config: &CloudConfig, content: String) -> Result<String, ServerError> {
        let body = GistRequestModel::single_file(&self.description, &self.file_name, content);
        let response = if config.gist_id.is_empty() {
            self.transport.create_gist(&config.token, &body).await?
        } else {
            self.transport
                .update_gist(&config.token, &config.gist_id, &body)
                .await?
        };
        Ok(response.id)
    }

    async fn pull(&self, config: &CloudConfig) -> Result<String, ServerError> {
        let mut response = self
            .transport
            .get_gist(&config.token, &config.gist_id)
            .await?;
        let file = response
            .files
            .remove(&self.file_name)
            .ok_or_else(|| RemoteFileMissing::new(&self.file_name))?;
        match (file.truncated, file.raw_url, file.content) {
            (true, Some(raw_url), _) => self.transport.get_raw(&config.token, &raw_url).await,
            (_, _, Some(content)) => Ok(content),
            _ => Err(RemoteFileMissing::new(&self.file_name)),
        }
    }
}
