//! Repair Commands

use crate::client::{Method, RequestClient};
use crate::config::UiConfig;
use crate::error::RequestError;
use crate::models::{ActionResponse, ItemId};

use super::{action_url, into_result};

pub fn claim_repair_url(config: &UiConfig, id: &ItemId) -> String {
    action_url(&config.repair_claim_endpoint, &[id.as_str()])
}

/// Assign a repair to the current user
pub async fn claim_repair(client: &RequestClient, config: &UiConfig, id: &ItemId) -> Result<ActionResponse, RequestError> {
    let url = claim_repair_url(config, id);
    let response: ActionResponse = client.send(&url, Method::Post, None).await?;
    into_result(response)
}
