// ── Console facade ──
//
// Entry point for front ends. Owns the API client and the session, and
// exposes every domain service. Wire types never leave this module;
// callers get `crate::model` types back.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, info};
use vitalwatch_api::types::{
    ChangePasswordRequest, DashboardResponse, DeviceConfigRequest, HealthDataQuery, Page,
    PageRequest, RegisterDeviceRequest, RegisterRequest, SyncHealthDataRequest, UpdateUserRequest,
};
use vitalwatch_api::{ApiClient, TokenSource};

use crate::auth::{LoginError, LoginForm};
use crate::config::ConsoleConfig;
use crate::dashboard::DashboardView;
use crate::error::CoreError;
use crate::model::{
    Alert, AlertId, Device, DeviceId, DeviceUuid, HealthSeries, TimeRange, User, UserDetail,
    UserId,
};
use crate::session::{Session, SessionUser};
use crate::state::{
    AlertBoard, AlertFilter, DeviceFilter, ListPage, PageFuture, PageLoader, UserDetailPage,
    UserFilter,
};

/// Admin console handle.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`; page containers keep their
/// own clone to refetch with.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    client: ApiClient,
    session: Session,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("base_url", &self.inner.config.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Lift a `Page` of wire rows into domain rows.
fn page_into<W, D: From<W>>(page: Page<W>) -> Page<D> {
    page.map(D::from)
}

/// Debug-log a reported BMI that disagrees with height/weight. The
/// reported value is still the one returned.
fn log_bmi_consistency(user: &User) {
    if user.bmi_matches_metrics() == Some(false) {
        debug!(
            user_id = %user.id,
            reported = ?user.bmi,
            weight_kg = ?user.weight_kg,
            height_m = ?user.height_m,
            "reported BMI disagrees with height/weight"
        );
    }
}

impl Console {
    /// Build a console for `config`. Requests carry the session's token.
    pub fn new(config: ConsoleConfig, session: Session) -> Result<Self, CoreError> {
        let tokens: Arc<dyn TokenSource> = Arc::new(session.clone());
        let client = ApiClient::new(config.base_url.as_str(), &config.transport(), tokens)?;
        debug!(base_url = %config.base_url, "console ready");
        Ok(Self {
            inner: Arc::new(ConsoleInner {
                config,
                client,
                session,
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Validate, sign in and persist the token and identity.
    pub async fn login(&self, form: &LoginForm) -> Result<SessionUser, LoginError> {
        let request = form.validate()?;
        info!(username = %request.username, "signing in");

        let resp = self
            .inner
            .client
            .login(&request)
            .await
            .map_err(LoginError::classify)?;

        let user = SessionUser {
            username: request.username,
            signed_in_at: Utc::now(),
        };
        self.inner
            .session
            .set_token(&resp.token)
            .map_err(LoginError::Unexpected)?;
        self.inner
            .session
            .set_user(&user)
            .map_err(LoginError::Unexpected)?;
        Ok(user)
    }

    /// Create an account. Returns the backend's confirmation message.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, CoreError> {
        Ok(self.inner.client.register(request).await?)
    }

    /// Drop token and identity. The theme preference is kept.
    pub fn logout(&self) -> Result<(), CoreError> {
        info!("signing out");
        self.inner.session.clear()
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn list_users(&self, request: &PageRequest) -> Result<Page<User>, CoreError> {
        let page = self.inner.client.list_users(request).await?;
        Ok(page_into(page))
    }

    /// `None` when the backend answers 404.
    pub async fn get_user(&self, id: UserId) -> Result<Option<User>, CoreError> {
        match self.inner.client.get_user(id.get()).await {
            Ok(raw) => {
                let user = User::from(raw);
                log_bmi_consistency(&user);
                Ok(Some(user))
            }
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn user_devices(&self, id: UserId) -> Result<Vec<Device>, CoreError> {
        let devices = self.inner.client.list_user_devices(id.get()).await?;
        Ok(devices.into_iter().map(Device::from).collect())
    }

    /// Profile and devices, fetched concurrently.
    pub async fn user_detail(&self, id: UserId) -> Result<Option<UserDetail>, CoreError> {
        let (user, devices) = tokio::join!(self.get_user(id), self.user_devices(id));
        let Some(user) = user? else {
            return Ok(None);
        };
        Ok(Some(UserDetail {
            user,
            devices: devices?,
        }))
    }

    pub async fn update_user(&self, request: &UpdateUserRequest) -> Result<User, CoreError> {
        let user = self.inner.client.update_user(request).await?;
        Ok(User::from(user))
    }

    pub async fn change_password(
        &self,
        id: UserId,
        request: &ChangePasswordRequest,
    ) -> Result<(), CoreError> {
        Ok(self.inner.client.change_password(id.get(), request).await?)
    }

    /// Samples for one of the user's devices over `range`, ending at `now`.
    pub async fn user_health(
        &self,
        id: UserId,
        device: &DeviceUuid,
        range: TimeRange,
        now: DateTime<Utc>,
    ) -> Result<HealthSeries, CoreError> {
        let (from, to) = range.window(now);
        let window = HealthDataQuery {
            from: Some(from.to_rfc3339_opts(SecondsFormat::Secs, true)),
            to: Some(to.to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        let raw = self
            .inner
            .client
            .user_health_data(id.get(), device.as_str(), &window)
            .await?;
        Ok(HealthSeries::from(raw))
    }

    // ── Devices ──────────────────────────────────────────────────────

    pub async fn list_devices(&self, request: &PageRequest) -> Result<Page<Device>, CoreError> {
        let page = self.inner.client.list_devices(request).await?;
        Ok(page_into(page))
    }

    pub async fn register_device(
        &self,
        request: &RegisterDeviceRequest,
    ) -> Result<Device, CoreError> {
        let device = self.inner.client.register_device(request).await?;
        Ok(Device::from(device))
    }

    pub async fn configure_device(
        &self,
        id: DeviceId,
        request: &DeviceConfigRequest,
    ) -> Result<Device, CoreError> {
        let device = self.inner.client.configure_device(id.get(), request).await?;
        Ok(Device::from(device))
    }

    // ── Health ───────────────────────────────────────────────────────

    /// Push a batch of samples for one device.
    pub async fn sync_health_data(&self, request: &SyncHealthDataRequest) -> Result<(), CoreError> {
        if request.data_points.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "health data batch has no samples".into(),
            });
        }
        Ok(self.inner.client.sync_health_data(request).await?)
    }

    /// Raw aggregate, fetched fresh on every call.
    pub async fn dashboard_snapshot(&self) -> Result<DashboardResponse, CoreError> {
        Ok(self.inner.client.dashboard().await?)
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardView, CoreError> {
        let snapshot = self.dashboard_snapshot().await?;
        Ok(DashboardView::derive(&snapshot, now))
    }

    // ── Alerts ───────────────────────────────────────────────────────

    pub async fn list_alerts(&self, request: &PageRequest) -> Result<Page<Alert>, CoreError> {
        let page = self.inner.client.list_alerts(request).await?;
        Ok(page_into(page))
    }

    /// `None` when the backend answers 404.
    pub async fn get_alert(&self, id: &AlertId) -> Result<Option<Alert>, CoreError> {
        match self.inner.client.get_alert(id.as_str()).await {
            Ok(raw) => Ok(Some(Alert::from(raw))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn mark_alert_viewed(&self, id: &AlertId) -> Result<(), CoreError> {
        Ok(self.inner.client.mark_alert_viewed(id.as_str()).await?)
    }

    pub async fn mark_alert_resolved(&self, id: &AlertId) -> Result<(), CoreError> {
        Ok(self.inner.client.mark_alert_resolved(id.as_str()).await?)
    }

    // ── Page containers ──────────────────────────────────────────────

    pub fn users_page(&self, request: PageRequest, filter: UserFilter) -> ListPage<User, UserFilter> {
        let console = self.clone();
        let loader: PageLoader<User> = Arc::new(move |req: PageRequest| -> PageFuture<User> {
            let console = console.clone();
            Box::pin(async move { console.list_users(&req).await })
        });
        ListPage::new(loader, request, filter)
    }

    pub fn devices_page(
        &self,
        request: PageRequest,
        filter: DeviceFilter,
    ) -> ListPage<Device, DeviceFilter> {
        let console = self.clone();
        let loader: PageLoader<Device> = Arc::new(move |req: PageRequest| -> PageFuture<Device> {
            let console = console.clone();
            Box::pin(async move { console.list_devices(&req).await })
        });
        ListPage::new(loader, request, filter)
    }

    pub fn alerts_page(
        &self,
        request: PageRequest,
        filter: AlertFilter,
    ) -> ListPage<Alert, AlertFilter> {
        let console = self.clone();
        let loader: PageLoader<Alert> = Arc::new(move |req: PageRequest| -> PageFuture<Alert> {
            let console = console.clone();
            Box::pin(async move { console.list_alerts(&req).await })
        });
        ListPage::new(loader, request, filter)
    }

    pub fn alert_board(&self, request: PageRequest, filter: AlertFilter) -> AlertBoard {
        AlertBoard::new(self.clone(), request, filter)
    }

    pub fn user_detail_page(&self, id: UserId) -> UserDetailPage {
        UserDetailPage::new(self.clone(), id)
    }

    /// Default list request using the configured page size.
    pub fn first_page(&self) -> PageRequest {
        PageRequest::new(0, self.inner.config.page_size)
    }
}
