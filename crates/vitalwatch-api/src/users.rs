// User profile endpoints.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::{
    ChangePasswordRequest, DeviceResponse, HealthDataQuery, HealthDataResponse, Page, PageRequest,
    UpdateUserRequest, UserResponse,
};

impl ApiClient {
    /// `GET /users?page=&size=&sortBy=`
    pub async fn list_users(&self, page: &PageRequest) -> Result<Page<UserResponse>, Error> {
        self.fetch(Endpoint::LIST_USERS, &[], &page.to_query()).await
    }

    /// `GET /user/{id}`
    pub async fn get_user(&self, id: i64) -> Result<UserResponse, Error> {
        self.fetch(Endpoint::GET_USER, &[id.to_string().as_str()], &[])
            .await
    }

    /// `GET /user/{id}/devices`
    pub async fn list_user_devices(&self, id: i64) -> Result<Vec<DeviceResponse>, Error> {
        self.fetch(Endpoint::USER_DEVICES, &[id.to_string().as_str()], &[])
            .await
    }

    /// `PATCH /user`
    pub async fn update_user(&self, request: &UpdateUserRequest) -> Result<UserResponse, Error> {
        self.submit(Endpoint::UPDATE_USER, &[], request).await
    }

    /// `PATCH /user/{id}/password`
    pub async fn change_password(
        &self,
        id: i64,
        request: &ChangePasswordRequest,
    ) -> Result<(), Error> {
        let id = id.to_string();
        self.submit::<serde_json::Value, _>(Endpoint::CHANGE_PASSWORD, &[id.as_str()], request)
            .await
            .map(drop)
    }

    /// `GET /user/{id}/{deviceUuid}/health-data?from=&to=`
    pub async fn user_health_data(
        &self,
        id: i64,
        device_uuid: &str,
        window: &HealthDataQuery,
    ) -> Result<HealthDataResponse, Error> {
        self.fetch(
            Endpoint::USER_HEALTH_DATA,
            &[id.to_string().as_str(), device_uuid],
            &window.to_query(),
        )
        .await
    }
}
