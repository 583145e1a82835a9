//! Task Commands

use crate::client::{Method, RequestClient};
use crate::config::UiConfig;
use crate::error::RequestError;
use crate::models::{ActionResponse, ItemId, ItemStatus};

use super::{action_url, into_result};

pub fn task_status_url(config: &UiConfig, id: &ItemId, status: &ItemStatus) -> String {
    action_url(&config.task_status_endpoint, &[id.as_str(), status.as_str()])
}

/// Move a task to `status`
pub async fn change_task_status(
    client: &RequestClient,
    config: &UiConfig,
    id: &ItemId,
    status: &ItemStatus,
) -> Result<ActionResponse, RequestError> {
    let url = task_status_url(config, id, status);
    let response: ActionResponse = client.send(&url, Method::Post, None).await?;
    into_result(response)
}
