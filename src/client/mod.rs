//! Record repository client.
//!
//! Typed calls against the remote store's REST surface. Every response is
//! checked against its wire schema before it reaches the caller, and status
//! codes are folded back into the crate's error taxonomy:
//!
//! | Response              | Error                       |
//! |-----------------------|-----------------------------|
//! | 404                   | [`Error::NotFound`]         |
//! | 403                   | [`Error::PermissionDenied`] |
//! | other 4xx             | [`Error::Validation`]       |
//! | 5xx, network failure  | [`Error::Transport`]        |
//! | malformed 2xx body    | [`Error::Validation`]       |

pub mod http;
pub mod local;
pub mod transport;

pub use http::HttpTransport;
pub use local::LocalTransport;
pub use transport::{ApiRequest, ApiResponse, Transport};

use crate::{
    errors::{Error, Result},
    models::{
        ActivityLogDraft, ActivityLogEntry, PlantingSchedule, PriceSnapshot, Product,
        ProductDraft, ScheduleDraft, SessionUser, Workspace,
    },
    wire::{
        ActivityLogBody, ActivityLogRecord, CreateWorkspaceBody, DeleteResponse,
        JoinWorkspaceBody, PriceSnapshotRecord, ProductBody, ProductRecord, ScheduleBody,
        ScheduleRecord, WorkspaceRecord,
    },
};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::warn;

/// Cheaply cloneable handle to the remote store.
#[derive(Debug, Clone)]
pub struct RecordClient {
    transport: Arc<dyn Transport>,
}

/// Pulls `{"error": "..."}` out of a failure body, if present.
fn error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

fn decode_all<R, T>(records: Vec<R>) -> Result<Vec<T>>
where
    T: TryFrom<R, Error = Error>,
{
    records.into_iter().map(T::try_from).collect()
}

impl RecordClient {
    /// Wraps a transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Client for a store reachable over HTTP at `base_url`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if the URL does not parse.
    pub fn http(base_url: &str) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(base_url)?))
    }

    /// Client that calls `router` in-process.
    #[must_use]
    pub fn local(router: axum::Router) -> Self {
        Self::new(LocalTransport::new(router))
    }

    /// Sends `request` and decodes a successful body as `T`.
    ///
    /// `entity` and `subject` name the target for [`Error::NotFound`].
    async fn call<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        entity: &'static str,
        subject: &str,
    ) -> Result<T> {
        let method = request.method.clone();
        let path = request.display_path();
        let response = self.transport.send(request).await?;
        let status = response.status;

        if status.is_success() {
            return serde_json::from_slice(&response.body).map_err(|e| {
                Error::validation(format!("malformed response from {method} {path}: {e}"))
            });
        }

        let message = error_message(&response.body).unwrap_or_else(|| status.to_string());
        warn!("{} {} returned {}: {}", method, path, status, message);

        Err(match status {
            StatusCode::NOT_FOUND => Error::not_found(entity, subject),
            StatusCode::FORBIDDEN => Error::PermissionDenied { message },
            s if s.is_client_error() => Error::validation(message),
            _ => Error::transport(format!("{method} {path} returned {status}: {message}")),
        })
    }

    fn json_request(method: Method, path: String, body: &impl Serialize) -> Result<ApiRequest> {
        Ok(ApiRequest::new(method, path).with_body(serde_json::to_value(body)?))
    }

    // Products

    /// Fetches every product.
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let records: Vec<ProductRecord> = self
            .call(ApiRequest::new(Method::GET, "/api/products"), "product", "")
            .await?;
        decode_all(records)
    }

    /// Creates a product; the store assigns its identity.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product> {
        let body = ProductBody::from(draft);
        let request = Self::json_request(Method::POST, "/api/products".to_string(), &body)?;
        let record: ProductRecord = self.call(request, "product", "").await?;
        Product::try_from(record)
    }

    /// Replaces every field of `product`.
    pub async fn update_product(&self, product: &Product) -> Result<Product> {
        let body = ProductBody::from(&ProductDraft::from(product));
        let request = Self::json_request(Method::PUT, "/api/products".to_string(), &body)?
            .with_segment(&product.id);
        let record: ProductRecord = self.call(request, "product", &product.id).await?;
        Product::try_from(record)
    }

    /// Deletes a product, returning how many rows went away (0 if already gone).
    pub async fn remove_product(&self, id: &str) -> Result<u64> {
        let request = ApiRequest::new(Method::DELETE, "/api/products").with_segment(id);
        let response: DeleteResponse = self.call(request, "product", id).await?;
        Ok(response.changes)
    }

    // Schedules

    /// Fetches every planting schedule.
    pub async fn list_schedules(&self) -> Result<Vec<PlantingSchedule>> {
        let records: Vec<ScheduleRecord> = self
            .call(ApiRequest::new(Method::GET, "/api/schedules"), "schedule", "")
            .await?;
        decode_all(records)
    }

    /// Creates a schedule.
    pub async fn create_schedule(&self, draft: &ScheduleDraft) -> Result<PlantingSchedule> {
        let body = ScheduleBody::from(draft);
        let request = Self::json_request(Method::POST, "/api/schedules".to_string(), &body)?;
        let record: ScheduleRecord = self.call(request, "schedule", "").await?;
        PlantingSchedule::try_from(record)
    }

    /// Replaces every field of `schedule`.
    pub async fn update_schedule(&self, schedule: &PlantingSchedule) -> Result<PlantingSchedule> {
        let body = ScheduleBody::from(&ScheduleDraft::from(schedule));
        let request = Self::json_request(Method::PUT, "/api/schedules".to_string(), &body)?
            .with_segment(&schedule.id);
        let record: ScheduleRecord = self.call(request, "schedule", &schedule.id).await?;
        PlantingSchedule::try_from(record)
    }

    /// Deletes a schedule, returning how many rows went away.
    pub async fn remove_schedule(&self, id: &str) -> Result<u64> {
        let request = ApiRequest::new(Method::DELETE, "/api/schedules").with_segment(id);
        let response: DeleteResponse = self.call(request, "schedule", id).await?;
        Ok(response.changes)
    }

    // Price history

    /// Fetches every monthly price snapshot, oldest first.
    pub async fn list_price_history(&self) -> Result<Vec<PriceSnapshot>> {
        let records: Vec<PriceSnapshotRecord> = self
            .call(
                ApiRequest::new(Method::GET, "/api/price-history"),
                "price snapshot",
                "",
            )
            .await?;
        Ok(records.into_iter().map(PriceSnapshot::from).collect())
    }

    // Activity log

    /// Fetches the newest activity entries, newest first.
    pub async fn list_activity_logs(&self) -> Result<Vec<ActivityLogEntry>> {
        let records: Vec<ActivityLogRecord> = self
            .call(
                ApiRequest::new(Method::GET, "/api/activity-logs"),
                "activity log",
                "",
            )
            .await?;
        decode_all(records)
    }

    /// Appends an activity entry.
    pub async fn create_activity_log(&self, draft: &ActivityLogDraft) -> Result<ActivityLogEntry> {
        let body = ActivityLogBody::from(draft);
        let request = Self::json_request(Method::POST, "/api/activity-logs".to_string(), &body)?;
        let record: ActivityLogRecord = self.call(request, "activity log", "").await?;
        ActivityLogEntry::try_from(record)
    }

    // Workspaces

    /// Creates a workspace owned by `owner`.
    pub async fn create_workspace(&self, name: &str, owner: &SessionUser) -> Result<Workspace> {
        let body = CreateWorkspaceBody {
            name: name.to_string(),
            owner_id: owner.id.clone(),
            owner_name: owner.name.clone(),
        };
        let request = Self::json_request(Method::POST, "/api/workspaces".to_string(), &body)?;
        let record: WorkspaceRecord = self.call(request, "workspace", "").await?;
        Workspace::try_from(record)
    }

    /// Joins the workspace holding `code` as an employee.
    pub async fn join_workspace(&self, code: &str, user: &SessionUser) -> Result<Workspace> {
        let body = JoinWorkspaceBody {
            code: code.to_string(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
        };
        let request =
            Self::json_request(Method::POST, "/api/workspaces/join".to_string(), &body)?;
        let record: WorkspaceRecord = self.call(request, "workspace", code).await?;
        Workspace::try_from(record)
    }

    /// Lists the workspaces `user_id` belongs to.
    pub async fn list_workspaces(&self, user_id: &str) -> Result<Vec<Workspace>> {
        let request =
            ApiRequest::new(Method::GET, "/api/workspaces").with_query("userId", user_id);
        let records: Vec<WorkspaceRecord> = self.call(request, "workspace", "").await?;
        decode_all(records)
    }

    /// Fetches one workspace on behalf of `user_id`.
    pub async fn get_workspace(&self, id: &str, user_id: &str) -> Result<Workspace> {
        let request = ApiRequest::new(Method::GET, "/api/workspaces")
            .with_segment(id)
            .with_query("userId", user_id);
        let record: WorkspaceRecord = self.call(request, "workspace", id).await?;
        Workspace::try_from(record)
    }
}
