// Login and self-registration.

use crate::client::ApiClient;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::types::{LoginRequest, LoginResponse, RegisterRequest};

impl ApiClient {
    /// Exchange credentials for a bearer token.
    ///
    /// `POST /login`
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, Error> {
        self.submit(Endpoint::LOGIN, &[], request).await
    }

    /// Create an account. Returns the server's confirmation message.
    ///
    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, Error> {
        let resp = self
            .send_json::<serde_json::Value, _>(Endpoint::REGISTER, &[], request)
            .await?;
        Ok(resp
            .message
            .or_else(|| resp.data.as_str().map(str::to_owned))
            .unwrap_or_default())
    }
}
