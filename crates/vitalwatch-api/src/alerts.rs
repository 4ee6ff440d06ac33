// Health alert endpoints.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::{AlertResponse, Page, PageRequest};

impl ApiClient {
    /// `GET /alerts?page=&size=&sortBy=`
    pub async fn list_alerts(&self, page: &PageRequest) -> Result<Page<AlertResponse>, Error> {
        self.fetch(Endpoint::LIST_ALERTS, &[], &page.to_query())
            .await
    }

    /// `GET /alerts/{id}`
    pub async fn get_alert(&self, id: &str) -> Result<AlertResponse, Error> {
        self.fetch(Endpoint::GET_ALERT, &[id], &[]).await
    }

    /// `PATCH /alerts/{id}/viewed`
    pub async fn mark_alert_viewed(&self, id: &str) -> Result<(), Error> {
        self.transition_alert(Endpoint::MARK_ALERT_VIEWED, id).await
    }

    /// `PATCH /alerts/{id}/resolved`
    pub async fn mark_alert_resolved(&self, id: &str) -> Result<(), Error> {
        self.transition_alert(Endpoint::MARK_ALERT_RESOLVED, id)
            .await
    }

    async fn transition_alert(&self, endpoint: Endpoint, id: &str) -> Result<(), Error> {
        self.send::<serde_json::Value>(endpoint, &[id], &[])
            .await
            .map(drop)
    }
}
