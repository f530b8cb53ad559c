use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::errors::{FetchError, FetchResult};
use crate::shared::config::Settings;

const RESOURCE_KEY_HEADER: &str = "X-PowerBI-ResourceKey";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Remote sources the statistics are pulled from.
#[async_trait]
pub trait ReportClient: Send + Sync {
    /// Runs one query payload against the report endpoint.
    async fn query(&self, payload: &Value) -> FetchResult<Value>;

    /// HTML of the public page carrying the live pilgrim count.
    async fn headline_page(&self) -> FetchResult<String>;
}

pub struct HttpReportClient {
    http: reqwest::Client,
    report_url: String,
    website_url: String,
    resource_key: String,
}

impl HttpReportClient {
    pub fn new(
        report_url: impl Into<String>,
        website_url: impl Into<String>,
        resource_key: impl Into<String>,
        user_agent: &str,
    ) -> FetchResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            report_url: report_url.into(),
            website_url: website_url.into(),
            resource_key: resource_key.into(),
        })
    }

    pub fn from_config(settings: &Settings) -> FetchResult<Self> {
        Self::new(
            &settings.powerbi.url,
            &settings.website.url,
            &settings.powerbi.resource_key,
            &settings.powerbi.user_agent,
        )
    }
}

fn check_status(url: &str, response: &reqwest::Response) -> FetchResult<()> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ReportClient for HttpReportClient {
    async fn query(&self, payload: &Value) -> FetchResult<Value> {
        let response = self
            .http
            .post(&self.report_url)
            .header(RESOURCE_KEY_HEADER, &self.resource_key)
            .json(payload)
            .send()
            .await?;
        check_status(&self.report_url, &response)?;

        let body = response.text().await?;
        debug!(target: "pilgrim_stats::fetch", bytes = body.len(), "Report query answered");
        Ok(serde_json::from_str(&body)?)
    }

    async fn headline_page(&self) -> FetchResult<String> {
        let response = self.http.get(&self.website_url).send().await?;
        check_status(&self.website_url, &response)?;
        Ok(response.text().await?)
    }
}
