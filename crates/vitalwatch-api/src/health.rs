// Health sample ingestion.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::SyncHealthDataRequest;

impl ApiClient {
    /// Push a batch of samples for one device.
    ///
    /// `POST /sync/health-data`
    pub async fn sync_health_data(&self, request: &SyncHealthDataRequest) -> Result<(), Error> {
        self.submit::<serde_json::Value, _>(Endpoint::SYNC_HEALTH_DATA, &[], request)
            .await
            .map(drop)
    }
}
