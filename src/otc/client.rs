//! Read-only query client for the Otc contract.
//!
//! Every method issues one or more `eth_call`s in sequence, each awaited
//! before the next, and decodes the fixed-layout result. Failures are never
//! replaced by defaults: "no such order" is `None`, a batch past the end is an
//! empty `Vec`, and everything else that goes wrong is an [`Error`].

use alloy_primitives::{Address, B256, U256};

use super::codec::{self, Words};
use super::{fee_for, fill_value, selectors};
use crate::config::OtcConfig;
use crate::error::{Error, Result};
use crate::models::{FillQuote, OrderSummary, OrderView, PlatformStats};
use crate::rpc::{RpcApi, RpcTransport};

pub struct OtcClient<T: RpcTransport = RpcApi> {
    transport: T,
    contract: Address,
    batch_size: u64,
}

impl OtcClient<RpcApi> {
    /// HTTP-backed client for the contract named in `config`.
    pub fn new(config: &OtcConfig) -> Result<Self> {
        Self::with_transport(config, RpcApi::new(config)?)
    }
}

impl<T: RpcTransport> OtcClient<T> {
    pub fn with_transport(config: &OtcConfig, transport: T) -> Result<Self> {
        let contract = crate::utils::parse_address(&config.contract_address)?;
        Ok(Self {
            transport,
            contract,
            batch_size: config.batch_size.clamp(1, super::VIEW_BATCH),
        })
    }

    pub fn contract(&self) -> &Address {
        &self.contract
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    async fn call(&self, selector: &str, words: &[String]) -> Result<Vec<u8>> {
        let data = codec::call_data(selector, words);
        let result = self.transport.eth_call(&self.contract, &data).await?;
        codec::decode_hex_result(&result)
    }

    /// Number of orders ever posted (`getOrderIdsLength`).
    pub async fn order_count(&self) -> Result<u64> {
        let data = self.call(selectors::GET_ORDER_IDS_LENGTH, &[]).await?;
        Words::new(&data).u64(0)
    }

    /// Identifier of the order at `index` in posting order.
    pub async fn order_id_at(&self, index: u64) -> Result<B256> {
        let data = self
            .call(selectors::GET_ORDER_AT, &[codec::encode_uint(U256::from(index))])
            .await?;
        Words::new(&data).bytes32(0)
    }

    /// Full view of the order with identifier `id`, or `None` when the contract
    /// knows no such order.
    pub async fn order_view(&self, id: &B256) -> Result<Option<OrderView>> {
        let data = self
            .call(selectors::GET_ORDER_VIEW, &[codec::encode_bytes32(id)])
            .await?;
        decode_optional_view(&data)
    }

    /// Like [`order_view`](Self::order_view) but takes the `0x`-prefixed id
    /// string, rejecting malformed ids before any request goes out.
    pub async fn order_view_str(&self, id: &str) -> Result<Option<OrderView>> {
        let id = crate::utils::parse_order_id(id)?;
        self.order_view(&id).await
    }

    pub async fn order_view_by_index(&self, index: u64) -> Result<Option<OrderView>> {
        let data = self
            .call(
                selectors::GET_ORDER_VIEW_BY_INDEX,
                &[codec::encode_uint(U256::from(index))],
            )
            .await?;
        decode_optional_view(&data)
    }

    /// One page of order summaries starting at `offset`.
    ///
    /// `limit` is capped at the batch size. An offset at or past the current
    /// order count yields an empty page without requesting the batch.
    pub async fn order_summaries(&self, offset: u64, limit: u64) -> Result<Vec<OrderSummary>> {
        let total = self.order_count().await?;
        if offset >= total {
            return Ok(Vec::new());
        }
        let limit = limit.min(self.batch_size).min(total - offset);
        self.fetch_batch(offset, limit).await
    }

    /// Every order summary, paging through the contract one batch at a time.
    pub async fn all_order_summaries(&self) -> Result<Vec<OrderSummary>> {
        let total = self.order_count().await?;
        self.summaries_up_to(total).await
    }

    async fn summaries_up_to(&self, total: u64) -> Result<Vec<OrderSummary>> {
        // total is node-supplied, so no pre-allocation from it
        let mut out = Vec::new();
        let mut offset = 0;
        while offset < total {
            let limit = self.batch_size.min(total - offset);
            let batch = self.fetch_batch(offset, limit).await?;
            if batch.is_empty() {
                tracing::warn!(offset, total, "contract returned an empty batch before the end");
                return Err(Error::ShortResponse {
                    needed: limit as usize * codec::ORDER_SUMMARY_WORDS * codec::WORD_BYTES,
                    got: 0,
                });
            }
            offset += batch.len() as u64;
            out.extend(batch);
        }
        Ok(out)
    }

    async fn fetch_batch(&self, offset: u64, limit: u64) -> Result<Vec<OrderSummary>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let data = self
            .call(
                selectors::GET_ORDER_SUMMARIES_BATCH,
                &[
                    codec::encode_uint(U256::from(offset)),
                    codec::encode_uint(U256::from(limit)),
                ],
            )
            .await?;
        let mut batch = codec::decode_order_summaries(&data)?;
        batch.truncate(limit as usize);
        Ok(batch)
    }

    pub async fn is_paused(&self) -> Result<bool> {
        let data = self.call(selectors::IS_PLATFORM_PAUSED, &[]).await?;
        Words::new(&data).bool(0)
    }

    /// Conservative variant of [`is_paused`](Self::is_paused): any failure to
    /// read the flag is reported as paused.
    pub async fn is_paused_or_assume_paused(&self) -> bool {
        match self.is_paused().await {
            Ok(paused) => paused,
            Err(e) => {
                tracing::warn!(error = %e, "could not read pause flag, assuming paused");
                true
            }
        }
    }

    pub async fn min_order_size(&self) -> Result<U256> {
        let data = self.call(selectors::MIN_ORDER_SIZE, &[]).await?;
        Words::new(&data).uint(0)
    }

    pub async fn fee_bps(&self) -> Result<u64> {
        let data = self.call(selectors::FEE_PERCENT_BPS, &[]).await?;
        Words::new(&data).u64(0)
    }

    /// Aggregate stats. Open orders are counted here by walking every summary,
    /// so cost grows with the total order count.
    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        let total_orders = self.order_count().await?;
        let open_orders = self
            .summaries_up_to(total_orders)
            .await?
            .iter()
            .filter(|s| s.is_open())
            .count() as u64;
        Ok(PlatformStats {
            total_orders,
            open_orders,
            min_order_size: self.min_order_size().await?,
            fee_bps: self.fee_bps().await?,
            paused: self.is_paused().await?,
        })
    }

    /// Value in wei of filling `fill_amount` units of order `id`, before fees.
    /// `None` when the order does not exist.
    pub async fn fill_value(&self, id: &B256, fill_amount: U256) -> Result<Option<U256>> {
        match self.order_view(id).await? {
            Some(view) => Ok(Some(fill_value(view.price_per_unit, fill_amount)?)),
            None => Ok(None),
        }
    }

    /// Fill value plus the platform fee at the current rate.
    pub async fn fill_quote(&self, id: &B256, fill_amount: U256) -> Result<Option<FillQuote>> {
        let Some(value) = self.fill_value(id, fill_amount).await? else {
            return Ok(None);
        };
        let fee = fee_for(value, self.fee_bps().await?)?;
        let total = value.checked_add(fee).ok_or(Error::Overflow("fill total"))?;
        Ok(Some(FillQuote { fill_amount, value, fee, total }))
    }
}

/// Missing mapping entries come back either as no data or as a zeroed struct.
fn decode_optional_view(data: &[u8]) -> Result<Option<OrderView>> {
    if data.is_empty() {
        return Ok(None);
    }
    let view = codec::decode_order_view(data)?;
    if view.id == B256::ZERO && view.maker == Address::ZERO {
        return Ok(None);
    }
    Ok(Some(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderStatus;
    use crate::otc::codec::tests::{sample_view, summary_words, view_words};
    use crate::otc::PRICE_SCALE;
    use async_trait::async_trait;
    use std::sync::Mutex;

    type Handler = Box<dyn Fn(&str, &[U256]) -> Result<String> + Send + Sync>;

    /// In-memory node: dispatches on selector and records every call.
    struct MockNode {
        handler: Handler,
        calls: Mutex<Vec<String>>,
    }

    impl MockNode {
        fn new(handler: impl Fn(&str, &[U256]) -> Result<String> + Send + Sync + 'static) -> Self {
            Self { handler: Box::new(handler), calls: Mutex::new(Vec::new()) }
        }

        fn selectors_called(&self) -> Vec<String> {
            self.calls.lock().unwrap().iter().map(|d| d[2..10].to_string()).collect()
        }
    }

    #[async_trait]
    impl RpcTransport for MockNode {
        async fn eth_call(&self, _to: &Address, data: &str) -> Result<String> {
            self.calls.lock().unwrap().push(data.to_string());
            let selector = &data[2..10];
            let args: Vec<U256> = data[10..]
                .as_bytes()
                .chunks(64)
                .map(|c| U256::from_str_radix(std::str::from_utf8(c).unwrap(), 16).unwrap())
                .collect();
            (self.handler)(selector, &args)
        }
    }

    fn word(n: u64) -> String {
        format!("0x{}", codec::encode_uint(U256::from(n)))
    }

    /// A node holding `views`, with fee 25 bps, min size 10, not paused.
    fn otc_node(views: Vec<OrderView>) -> MockNode {
        MockNode::new(move |selector, args| {
            let result = match selector {
                selectors::GET_ORDER_IDS_LENGTH => word(views.len() as u64),
                selectors::GET_ORDER_SUMMARIES_BATCH => {
                    let offset = args[0].to::<usize>();
                    let limit = args[1].to::<usize>();
                    let page: String = views
                        .iter()
                        .skip(offset)
                        .take(limit)
                        .map(|v| summary_words(&OrderSummary::from(v)))
                        .collect();
                    format!("0x{page}")
                }
                selectors::GET_ORDER_VIEW => {
                    let id = B256::from(args[0].to_be_bytes::<32>());
                    match views.iter().find(|v| v.id == id) {
                        Some(v) => format!("0x{}", view_words(v)),
                        None => format!("0x{}", "0".repeat(64 * 10)),
                    }
                }
                selectors::GET_ORDER_VIEW_BY_INDEX => match views.get(args[0].to::<usize>()) {
                    Some(v) => format!("0x{}", view_words(v)),
                    None => "0x".to_string(),
                },
                selectors::GET_ORDER_AT => match views.get(args[0].to::<usize>()) {
                    Some(v) => format!("0x{}", codec::encode_bytes32(&v.id)),
                    None => {
                        return Err(Error::Rpc { code: 3, message: "execution reverted".into() })
                    }
                },
                selectors::FEE_PERCENT_BPS => word(25),
                selectors::MIN_ORDER_SIZE => word(10),
                selectors::IS_PLATFORM_PAUSED => word(0),
                other => panic!("unexpected selector {other}"),
            };
            Ok(result)
        })
    }

    fn client(node: MockNode) -> OtcClient<MockNode> {
        OtcClient::with_transport(&OtcConfig::default(), node).unwrap()
    }

    fn views(n: u8) -> Vec<OrderView> {
        (1..=n)
            .map(|i| {
                let status = match i % 3 {
                    0 => OrderStatus::Filled,
                    1 => OrderStatus::Open,
                    _ => OrderStatus::Cancelled,
                };
                sample_view(i, status)
            })
            .collect()
    }

    #[test]
    fn test_rejects_bad_contract_address() {
        let config = OtcConfig { contract_address: "0x1234".into(), ..OtcConfig::default() };
        let result = OtcClient::with_transport(&config, otc_node(vec![]));
        assert!(matches!(result, Err(Error::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_order_count_and_id_at() {
        let vs = views(3);
        let c = client(otc_node(vs.clone()));
        assert_eq!(c.order_count().await.unwrap(), 3);
        assert_eq!(c.order_id_at(1).await.unwrap(), vs[1].id);
        assert!(matches!(c.order_id_at(9).await, Err(Error::Rpc { .. })));
    }

    #[tokio::test]
    async fn test_order_view_found_and_missing() {
        let vs = views(2);
        let c = client(otc_node(vs.clone()));
        assert_eq!(c.order_view(&vs[0].id).await.unwrap(), Some(vs[0].clone()));
        assert_eq!(c.order_view(&B256::repeat_byte(0xee)).await.unwrap(), None);
        assert_eq!(c.order_view_by_index(1).await.unwrap(), Some(vs[1].clone()));
        assert_eq!(c.order_view_by_index(5).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_bad_order_id_never_hits_network() {
        let node = otc_node(views(1));
        let c = client(node);
        assert!(matches!(c.order_view_str("0xabc").await, Err(Error::InvalidOrderId(_))));
        assert!(c.transport.selectors_called().is_empty());
    }

    #[tokio::test]
    async fn test_order_summaries_paging() {
        let vs = views(5);
        let c = client(otc_node(vs.clone()));
        let page = c.order_summaries(1, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, vs[1].id);
        assert_eq!(page[1].id, vs[2].id);

        // limit past the end is clipped
        assert_eq!(c.order_summaries(3, 48).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_offset_beyond_total_is_empty() {
        let c = client(otc_node(views(3)));
        assert!(c.order_summaries(3, 10).await.unwrap().is_empty());
        assert!(c.order_summaries(100, 10).await.unwrap().is_empty());
        // only the count was requested
        assert_eq!(
            c.transport.selectors_called(),
            vec![selectors::GET_ORDER_IDS_LENGTH, selectors::GET_ORDER_IDS_LENGTH]
        );
    }

    #[tokio::test]
    async fn test_all_summaries_spans_batches() {
        let vs = views(100);
        let c = client(otc_node(vs.clone()));
        let all = c.all_order_summaries().await.unwrap();
        assert_eq!(all.len(), 100);
        assert_eq!(all[99].id, vs[99].id);
        let batches = c
            .transport
            .selectors_called()
            .iter()
            .filter(|s| *s == selectors::GET_ORDER_SUMMARIES_BATCH)
            .count();
        assert_eq!(batches, 3); // 48 + 48 + 4
    }

    /// Node reports `count` orders but serves `batch` for every page.
    fn inconsistent_node(count: u64, batch: &'static str) -> MockNode {
        MockNode::new(move |selector, _| match selector {
            selectors::GET_ORDER_IDS_LENGTH => Ok(word(count)),
            selectors::GET_ORDER_SUMMARIES_BATCH => Ok(batch.to_string()),
            selectors::FEE_PERCENT_BPS | selectors::MIN_ORDER_SIZE | selectors::IS_PLATFORM_PAUSED => Ok(word(0)),
            other => panic!("unexpected selector {other}"),
        })
    }

    #[tokio::test]
    async fn test_empty_batch_before_total_is_error() {
        let c = client(inconsistent_node(5, "0x"));
        assert!(matches!(c.platform_stats().await, Err(Error::ShortResponse { got: 0, .. })));
        assert!(matches!(c.all_order_summaries().await, Err(Error::ShortResponse { .. })));
    }

    #[tokio::test]
    async fn test_huge_order_count_does_not_preallocate() {
        // a lying count must fail on the first empty page, not abort on allocation
        let c = client(inconsistent_node(u64::MAX, "0x"));
        assert!(matches!(c.all_order_summaries().await, Err(Error::ShortResponse { .. })));
        assert!(c.platform_stats().await.is_err());
        assert_eq!(
            c.transport
                .selectors_called()
                .iter()
                .filter(|s| *s == selectors::GET_ORDER_SUMMARIES_BATCH)
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_platform_stats_tallies_open() {
        let vs = views(7);
        let expected_open = vs.iter().filter(|v| v.is_open()).count() as u64;
        let c = client(otc_node(vs));
        let stats = c.platform_stats().await.unwrap();
        assert_eq!(stats.total_orders, 7);
        assert_eq!(stats.open_orders, expected_open);
        assert_eq!(stats.open_orders, 3); // seeds 1, 4, 7
        assert_eq!(stats.fee_bps, 25);
        assert_eq!(stats.min_order_size, U256::from(10u64));
        assert!(!stats.paused);
    }

    #[tokio::test]
    async fn test_fill_value_and_quote() {
        let mut vs = views(1);
        vs[0].price_per_unit = U256::from(2u64) * PRICE_SCALE;
        let id = vs[0].id;
        let c = client(otc_node(vs));

        assert_eq!(c.fill_value(&id, U256::from(5u64)).await.unwrap(), Some(U256::from(10u64)));
        assert_eq!(c.fill_value(&B256::repeat_byte(0xee), U256::from(5u64)).await.unwrap(), None);

        let quote = c.fill_quote(&id, U256::from(20_000u64)).await.unwrap().unwrap();
        assert_eq!(quote.value, U256::from(40_000u64));
        assert_eq!(quote.fee, U256::from(100u64));
        assert_eq!(quote.total, U256::from(40_100u64));
    }

    #[tokio::test]
    async fn test_short_response_is_error_not_default() {
        let c = client(MockNode::new(|_, _| Ok("0x".to_string())));
        assert!(matches!(c.order_count().await, Err(Error::ShortResponse { .. })));
        assert!(matches!(c.is_paused().await, Err(Error::ShortResponse { .. })));
        assert!(matches!(c.fee_bps().await, Err(Error::ShortResponse { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let c = client(MockNode::new(|_, _| Err(Error::HttpStatus(502))));
        assert!(matches!(c.order_count().await, Err(Error::HttpStatus(502))));
        assert!(matches!(c.platform_stats().await, Err(Error::HttpStatus(502))));
        assert!(c.is_paused_or_assume_paused().await);
    }

    #[tokio::test]
    async fn test_paused_flag_nonzero_word() {
        let c = client(MockNode::new(|_, _| Ok(word(7))));
        assert!(c.is_paused().await.unwrap());
        assert!(c.is_paused_or_assume_paused().await);
    }

    #[tokio::test]
    async fn test_call_data_layout() {
        let c = client(otc_node(views(2)));
        c.order_view_by_index(1).await.unwrap();
        let calls = c.transport.calls.lock().unwrap().clone();
        assert_eq!(
            calls[0],
            format!("0x{}{}1", selectors::GET_ORDER_VIEW_BY_INDEX, "0".repeat(63))
        );
    }
}
