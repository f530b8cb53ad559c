use std::sync::Arc;

use crate::engine::auth::ApiKeyVerifier;
use crate::engine::fetch::HttpReportClient;
use crate::engine::stats::{StatsService, StatsSettings};
use crate::engine::store::MySqlStore;
use crate::engine::template::TemplateAdjuster;
use crate::shared::config::{CONFIG, Settings};

pub struct FrontendContext {
    pub service: Arc<StatsService>,
    pub verifier: ApiKeyVerifier,
}

impl FrontendContext {
    pub fn new(service: Arc<StatsService>, verifier: ApiKeyVerifier) -> Arc<Self> {
        Arc::new(Self { service, verifier })
    }

    pub async fn from_config() -> anyhow::Result<Arc<Self>> {
        let settings: &Settings = &CONFIG;
        let verifier = ApiKeyVerifier::from_hex(&settings.server.api_key_hash)?;
        let service = build_service(settings).await?;
        Ok(Self::new(Arc::new(service), verifier))
    }
}

/// Wires the HTTP report client and the MySQL store into a `StatsService`.
pub async fn build_service(settings: &Settings) -> anyhow::Result<StatsService> {
    let client = Arc::new(HttpReportClient::from_config(settings)?);
    let store = Arc::new(MySqlStore::connect(&settings.database, &settings.stats).await?);
    let service = StatsService::from_store(
        client,
        store,
        TemplateAdjuster::new(settings.template.clone()),
        settings.calendar.clone(),
        StatsSettings::from_config(settings)?,
    )
    .await?;
    Ok(service)
}
