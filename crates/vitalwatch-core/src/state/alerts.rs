// ── Alert board ──
//
// The alerts page: a paged list plus optimistic status transitions.
// Local status is advanced before the backend call and is never rolled
// back, since rolling back a resolve would move an alert backwards.

use tracing::{debug, warn};
use vitalwatch_api::types::PageRequest;

use super::filter::AlertFilter;
use super::page::ListPage;
use crate::console::Console;
use crate::error::CoreError;
use crate::model::{Alert, AlertId, AlertStatus};

pub struct AlertBoard {
    console: Console,
    list: ListPage<Alert, AlertFilter>,
}

impl AlertBoard {
    pub fn new(console: Console, request: PageRequest, filter: AlertFilter) -> Self {
        let list = console.alerts_page(request, filter);
        Self { console, list }
    }

    pub fn list(&self) -> &ListPage<Alert, AlertFilter> {
        &self.list
    }

    pub async fn load(&self) {
        self.list.load().await;
    }

    fn find(&self, id: &AlertId) -> Option<Alert> {
        self.list
            .snapshot()
            .view
            .items()
            .iter()
            .find(|a| &a.id == id)
            .cloned()
    }

    fn set_status(&self, id: &AlertId, target: AlertStatus) {
        self.list.update_items(|alerts| {
            if let Some(alert) = alerts.iter_mut().find(|a| &a.id == id) {
                alert.status = alert.status.advance(target);
            }
        });
    }

    /// Open an alert. A `New` alert becomes `Viewed` locally and the
    /// backend is told; any other status issues no call.
    ///
    /// Returns the alert as now shown, or `None` if it is not on the
    /// current page.
    pub async fn view(&self, id: &AlertId) -> Result<Option<Alert>, CoreError> {
        let Some(alert) = self.find(id) else {
            return Ok(None);
        };
        if alert.status != AlertStatus::New {
            debug!(alert_id = %id, status = %alert.status, "alert already seen");
            return Ok(Some(alert));
        }

        self.set_status(id, AlertStatus::Viewed);
        if let Err(e) = self.console.mark_alert_viewed(id).await {
            warn!(alert_id = %id, error = %e, "failed to mark alert viewed");
            return Err(e);
        }
        Ok(self.find(id))
    }

    /// Resolve an alert from any unresolved status.
    pub async fn resolve(&self, id: &AlertId) -> Result<Option<Alert>, CoreError> {
        let Some(alert) = self.find(id) else {
            return Ok(None);
        };
        if alert.status.is_resolved() {
            return Ok(Some(alert));
        }

        self.set_status(id, AlertStatus::Resolved);
        if let Err(e) = self.console.mark_alert_resolved(id).await {
            warn!(alert_id = %id, error = %e, "failed to mark alert resolved");
            return Err(e);
        }
        Ok(self.find(id))
    }
}
