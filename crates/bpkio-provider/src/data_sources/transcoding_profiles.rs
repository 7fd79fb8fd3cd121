//! `bpkio_transcoding_profile` and `bpkio_transcoding_profiles`

use crate::model::{TranscodingProfileModel, TranscodingProfilesModel};
use async_trait::async_trait;
use bpkio_client::Client;
use bpkio_plugin::{DataSource, DataSourceError, Schema, Value};
use std::sync::Arc;

const ENTITY: &str = "Transcoding Profile";

fn conversion(source: bpkio_plugin::ConversionError) -> DataSourceError {
    DataSourceError::Conversion { entity: ENTITY, source }
}

pub struct TranscodingProfile {
    client: Arc<Client>,
}

#[async_trait]
impl DataSource for TranscodingProfile {
    type Client = Client;
    type Model = TranscodingProfileModel;

    const NAME: &'static str = "transcoding_profile";
    const ENTITY: &'static str = ENTITY;

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        TranscodingProfileModel::schema()
    }

    async fn read(
        &self,
        config: TranscodingProfileModel,
    ) -> Result<TranscodingProfileModel, DataSourceError> {
        let id = config.id.required_u64("id").map_err(conversion)?;
        match self.client.get_transcoding_profile(id).await {
            Ok(profile) => TranscodingProfileModel::flatten(profile).map_err(conversion),
            Err(e) if e.is_not_found() => Err(DataSourceError::NotFound { entity: ENTITY, id }),
            Err(e) => Err(DataSourceError::Api {
                entity: ENTITY,
                message: e.to_string(),
            }),
        }
    }
}

pub struct TranscodingProfiles {
    client: Arc<Client>,
}

#[async_trait]
impl DataSource for TranscodingProfiles {
    type Client = Client;
    type Model = TranscodingProfilesModel;

    const NAME: &'static str = "transcoding_profiles";
    const ENTITY: &'static str = "Transcoding Profiles";

    fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn schema() -> Schema {
        TranscodingProfilesModel::schema()
    }

    async fn read(
        &self,
        _config: TranscodingProfilesModel,
    ) -> Result<TranscodingProfilesModel, DataSourceError> {
        let profiles = self
            .client
            .list_all_transcoding_profiles()
            .await
            .map_err(|e| DataSourceError::Api {
                entity: Self::ENTITY,
                message: e.to_string(),
            })?;
        let profiles = profiles
            .into_iter()
            .map(TranscodingProfileModel::flatten)
            .collect::<Result<Vec<_>, _>>()
            .map_err(conversion)?;
        Ok(TranscodingProfilesModel {
            profiles: Value::Known(profiles),
        })
    }
}
