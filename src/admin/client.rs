use async_trait::async_trait;
use http::{header, HeaderValue, StatusCode};
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use super::*;
use crate::auth::Credentials;
use crate::http::{sign_v4, uri_encode, SERVICE_S3};
use crate::utils;

pub const ADMIN_API_PREFIX: &str = "/minio/admin/v3";

const CLIENT_TOKEN_PARAM: &str = "clientToken";
const FORCE_START_PARAM: &str = "forceStart";
const FORCE_STOP_PARAM: &str = "forceStop";

/// The heal-status call of the cluster admin API.
///
/// With an empty `client_token` a new heal sequence is started and only the
/// returned `HealStartSuccess` is meaningful. With a token, the status of the
/// running sequence is returned and the `HealStartSuccess` is empty.
#[async_trait]
pub trait HealClient: Send + Sync {
    async fn heal(
        &self,
        bucket: &str,
        prefix: &str,
        opts: &HealOpts,
        client_token: &str,
        force_start: bool,
    ) -> anyhow::Result<(HealStartSuccess, HealTaskStatus)>;
}

#[derive(Debug, Error)]
#[error("{message} (code: {code}, status: {status})")]
pub struct AdminApiError {
    pub code: String,
    pub message: String,
    pub status: StatusCode,
}

#[derive(Deserialize, Default)]
struct ErrorResponse {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

pub struct AdminClient {
    http: reqwest::Client,
    endpoint: url::Url,
    credentials: Credentials,
    region: String,
}

impl AdminClient {
    pub fn new(
        endpoint: url::Url,
        credentials: Credentials,
        region: String,
    ) -> anyhow::Result<AdminClient> {
        let http = reqwest::Client::builder()
            .connect_timeout(utils::seconds(15))
            .timeout(utils::minutes(15))
            .user_agent(concat!("healmon/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(AdminClient {
            http,
            endpoint,
            credentials,
            region,
        })
    }

    /// Starts a heal sequence on `bucket`/`prefix`, returning its client token.
    pub async fn start_heal(
        &self,
        bucket: &str,
        prefix: &str,
        opts: &HealOpts,
        force_start: bool,
    ) -> anyhow::Result<HealStartSuccess> {
        let body = serde_json::to_vec(opts)?;
        let resp = self
            .execute(bucket, prefix, body, "", force_start, false)
            .await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    /// Stops the heal sequence running on `bucket`/`prefix`.
    pub async fn stop_heal(&self, bucket: &str, prefix: &str) -> anyhow::Result<HealStartSuccess> {
        let body = serde_json::to_vec(&HealOpts::default())?;
        let resp = self.execute(bucket, prefix, body, "", false, true).await?;
        Ok(serde_json::from_slice(&resp)?)
    }

    pub fn heal_url(
        &self,
        bucket: &str,
        prefix: &str,
        client_token: &str,
        force_start: bool,
        force_stop: bool,
    ) -> url::Url {
        let mut path = format!("{}/heal/{}", ADMIN_API_PREFIX, uri_encode(bucket, true));
        if !bucket.is_empty() && !prefix.is_empty() {
            path.push('/');
            path.push_str(&uri_encode(prefix, false));
        }

        let mut query = Vec::new();
        if !client_token.is_empty() {
            query.push(format!(
                "{}={}",
                CLIENT_TOKEN_PARAM,
                uri_encode(client_token, true)
            ));
        }
        if force_start {
            query.push(format!("{}=true", FORCE_START_PARAM));
        }
        if force_stop {
            query.push(format!("{}=true", FORCE_STOP_PARAM));
        }

        let mut url = self.endpoint.clone();
        url.set_path(&path);
        let query = query.join("&");
        url.set_query(if query.is_empty() { None } else { Some(&query) });
        url
    }

    async fn execute(
        &self,
        bucket: &str,
        prefix: &str,
        body: Vec<u8>,
        client_token: &str,
        force_start: bool,
        force_stop: bool,
    ) -> anyhow::Result<Vec<u8>> {
        let url = self.heal_url(bucket, prefix, client_token, force_start, force_stop);
        debug!("POST {}", url);

        let signed = sign_v4(
            "POST",
            &url,
            &body,
            &self.credentials,
            &self.region,
            SERVICE_S3,
            utils::now(),
        );
        let mut req = self.http.post(url.clone());
        for (name, value) in signed {
            req = req.header(name, HeaderValue::from_str(&value)?);
        }
        if !body.is_empty() {
            req = req.header(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        let resp = req.body(body).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if status != StatusCode::OK {
            let err: ErrorResponse = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = if err.message.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_owned()
            } else {
                err.message
            };
            return Err(AdminApiError {
                code: err.code,
                message,
                status,
            }
            .into());
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl HealClient for AdminClient {
    async fn heal(
        &self,
        bucket: &str,
        prefix: &str,
        opts: &HealOpts,
        client_token: &str,
        force_start: bool,
    ) -> anyhow::Result<(HealStartSuccess, HealTaskStatus)> {
        if client_token.is_empty() {
            let start = self.start_heal(bucket, prefix, opts, force_start).await?;
            return Ok((start, HealTaskStatus::default()));
        }
        let resp = self
            .execute(bucket, prefix, Vec::new(), client_token, force_start, false)
            .await?;
        let status: HealTaskStatus = serde_json::from_slice(&resp)?;
        debug!(
            "heal status: summary={}, items={}",
            status.summary,
            status.items.len()
        );
        Ok((HealStartSuccess::default(), status))
    }
}
