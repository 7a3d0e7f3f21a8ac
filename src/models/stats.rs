use alloy_primitives::U256;
use serde::Serialize;

/// Contract-wide counters and parameters.
///
/// `open_orders` is tallied client-side from the order summaries, so it is
/// only as fresh as the batch reads that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformStats {
    pub total_orders: u64,
    pub open_orders: u64,
    pub min_order_size: U256,
    pub fee_bps: u64,
    pub paused: bool,
}

/// Cost of filling part of an order, before gas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillQuote {
    pub fill_amount: U256,
    /// `price_per_unit * fill_amount / 1e18`, floored
    pub value: U256,
    /// `value * fee_bps / 10000`, floored
    pub fee: U256,
    pub total: U256,
}
