use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::DashboardResponse;

impl ApiClient {
    /// Point-in-time system snapshot. The body is not enveloped.
    ///
    /// `GET /dashboard`
    pub async fn dashboard(&self) -> Result<DashboardResponse, Error> {
        self.fetch(Endpoint::DASHBOARD, &[], &[]).await
    }
}
