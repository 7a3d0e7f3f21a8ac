use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::OtcConfig;
use crate::error::{Error, Result};

/// Read-only contract call against the latest block.
///
/// Returns the raw `result` hex string. Implemented over HTTP by [`RpcApi`];
/// tests swap in an in-memory node.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn eth_call(&self, to: &Address, data: &str) -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    #[serde(default)]
    message: String,
}

/// Pull the `result` string out of a JSON-RPC response body.
pub fn parse_rpc_response(body: &str) -> Result<String> {
    let response: JsonRpcResponse = serde_json::from_str(body)?;
    if let Some(err) = response.error {
        return Err(Error::Rpc { code: err.code, message: err.message });
    }
    match response.result {
        Some(serde_json::Value::String(s)) => Ok(s),
        _ => Err(Error::MissingResult),
    }
}

pub struct RpcApi {
    api_url: String,
    client: reqwest::Client,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RpcApi {
    pub fn new(config: &OtcConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    pub fn with_client(config: &OtcConfig, client: reqwest::Client) -> Self {
        Self {
            api_url: crate::utils::remove_trailing_slash(&config.rpc_url),
            client,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn post_call(&self, to: &Address, data: &str) -> Result<String> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [{ "to": to.to_string(), "data": data }, "latest"],
        });
        let response = self.client.post(&self.api_url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }
        let body = response.text().await?;
        parse_rpc_response(&body)
    }
}

#[async_trait]
impl RpcTransport for RpcApi {
    async fn eth_call(&self, to: &Address, data: &str) -> Result<String> {
        tracing::debug!(%to, selector = &data[..data.len().min(10)], "eth_call");
        crate::utils::retry(self.max_retries, self.retry_delay_ms, Error::is_transient, || {
            self.post_call(to, data)
        })
        .await
    }
}
