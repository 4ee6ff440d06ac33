// Device inventory endpoints.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::{DeviceConfigRequest, DeviceResponse, Page, PageRequest, RegisterDeviceRequest};

impl ApiClient {
    /// `GET /devices?page=&size=&sortBy=`
    pub async fn list_devices(&self, page: &PageRequest) -> Result<Page<DeviceResponse>, Error> {
        self.fetch(Endpoint::LIST_DEVICES, &[], &page.to_query())
            .await
    }

    /// `POST /device`
    pub async fn register_device(
        &self,
        request: &RegisterDeviceRequest,
    ) -> Result<DeviceResponse, Error> {
        self.submit(Endpoint::REGISTER_DEVICE, &[], request).await
    }

    /// `PUT /devices/{id}/config`
    pub async fn configure_device(
        &self,
        id: i64,
        request: &DeviceConfigRequest,
    ) -> Result<DeviceResponse, Error> {
        self.submit(Endpoint::CONFIGURE_DEVICE, &[id.to_string().as_str()], request)
            .await
    }
}
