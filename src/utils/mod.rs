use std::sync::LazyLock;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use regex::Regex;

use crate::error::{Error, Result};

static ADDRESS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("static address pattern"));
static ORDER_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{64}$").expect("static order id pattern"));

pub fn remove_trailing_slash(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// `0x` followed by exactly 40 hex digits, either case.
pub fn is_valid_address(s: &str) -> bool {
    ADDRESS_PATTERN.is_match(s)
}

/// `0x` followed by exactly 64 hex digits, either case.
pub fn is_valid_order_id(s: &str) -> bool {
    ORDER_ID_PATTERN.is_match(s)
}

pub fn parse_address(s: &str) -> Result<Address> {
    if !is_valid_address(s) {
        return Err(Error::InvalidAddress(s.to_string()));
    }
    s.parse::<Address>()
        .map_err(|_| Error::InvalidAddress(s.to_string()))
}

pub fn parse_order_id(s: &str) -> Result<B256> {
    if !is_valid_order_id(s) {
        return Err(Error::InvalidOrderId(s.to_string()));
    }
    s.parse::<B256>()
        .map_err(|_| Error::InvalidOrderId(s.to_string()))
}

/// Run `f` up to `retries + 1` times with a fixed `delay_ms` pause between
/// attempts. Errors for which `should_retry` is false are returned at once.
pub async fn retry<T, E, F, Fut, P>(
    mut retries: u32,
    delay_ms: u64,
    should_retry: P,
    mut f: F,
) -> std::result::Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if retries == 0 || !should_retry(&e) => return Err(e),
            Err(e) => {
                attempt += 1;
                tracing::warn!(attempt, delay_ms, error = %e, "rpc attempt failed, retrying");
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                retries -= 1;
            }
        }
    }
}
