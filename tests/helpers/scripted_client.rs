use crate::engine::fetch::{FetchError, FetchResult, ReportClient};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

const SCRIPTED_URL: &str = "scripted://report";

/// `ReportClient` answering from a script: queued responses first, then the
/// fallback. Every query payload is recorded.
#[derive(Default)]
pub struct ScriptedReportClient {
    responses: Mutex<VecDeque<FetchResult<Value>>>,
    fallback: Option<Value>,
    page: Option<String>,
    queries: Mutex<Vec<Value>>,
}

impl ScriptedReportClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn with_failure(self, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(FetchError::Status {
                url: SCRIPTED_URL.to_string(),
                status,
            }));
        self
    }

    pub fn with_fallback(mut self, response: Value) -> Self {
        self.fallback = Some(response);
        self
    }

    pub fn with_page(mut self, html: &str) -> Self {
        self.page = Some(html.to_string());
        self
    }

    pub fn queries(&self) -> Vec<Value> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl ReportClient for ScriptedReportClient {
    async fn query(&self, payload: &Value) -> FetchResult<Value> {
        self.queries.lock().unwrap().push(payload.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(fallback)) => Ok(fallback.clone()),
            (None, None) => Err(FetchError::Status {
                url: SCRIPTED_URL.to_string(),
                status: 503,
            }),
        }
    }

    async fn headline_page(&self) -> FetchResult<String> {
        self.page.clone().ok_or(FetchError::Status {
            url: SCRIPTED_URL.to_string(),
            status: 404,
        })
    }
}
