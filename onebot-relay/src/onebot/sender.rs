//! Posts one message record to the webhook.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::{info, warn};
use url::Url;

use super::types::{PostMessageReq, SendError, SendOutcome};
use crate::hook::MsgRecord;

/// POST `data` to `server` as a JSON envelope.
///
/// A 200 is logged at info with the payload and response body, anything
/// else at warn with the payload. There is no retry and no timeout.
pub async fn send_message(
    client: &Client,
    server: &str,
    data: &MsgRecord,
) -> Result<SendOutcome, SendError> {
    let url = Url::parse(server)?;
    let payload = PostMessageReq::from_record(data).to_json()?;

    let resp = client
        .post(url)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .body(payload.clone())
        .send()
        .await?;

    let status = resp.status();

    if status == StatusCode::OK {
        let response = resp.text().await?;

        info!(
            server = server,
            payload = %payload,
            response = %response,
            "onebot_post_success"
        );

        Ok(SendOutcome::Delivered { response })
    } else {
        warn!(
            server = server,
            status_code = status.as_u16(),
            payload = %payload,
            "onebot_post_error"
        );

        Ok(SendOutcome::Rejected { status })
    }
}
