//! Otc contract bindings.
//!
//! Everything here is specific to one deployment: the selectors below are the
//! first four bytes of the keccak256 of each function signature as compiled
//! into that contract, and the record layouts in [`codec`] mirror its view
//! structs word for word.

use alloy_primitives::U256;

pub mod client;
pub mod codec;
pub mod payload;

pub use client::OtcClient;
pub use payload::TxPayload;

pub const DEFAULT_RPC_URL: &str = "https://eth.llamarpc.com";
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x07f8e9d0c1b2a3f4e5d6c7b8a9f0e1d2c3b4a5f6";

/// Largest page the contract serves from `getOrderSummariesBatch`.
pub const VIEW_BATCH: u64 = 48;
pub const BPS_DENOMINATOR: u64 = 10_000;
/// Fixed-point scale of `pricePerUnit` (1e18).
pub const PRICE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub mod selectors {
    /// `postOrder(uint8,bytes32,uint256,uint256,bool)`
    pub const POST_ORDER: &str = "8a4c5f2e";
    /// `fillOrder(bytes32,uint256)`
    pub const FILL_ORDER: &str = "3d7e849a";
    /// `cancelOrder(bytes32)`
    pub const CANCEL_ORDER: &str = "b8c7e9d1";
    /// `getOrderView(bytes32)`
    pub const GET_ORDER_VIEW: &str = "7f2a1b4c";
    /// `getOrderSummariesBatch(uint256,uint256)`
    pub const GET_ORDER_SUMMARIES_BATCH: &str = "9e3f2a1d";
    /// `getOrderIdsLength()`
    pub const GET_ORDER_IDS_LENGTH: &str = "1a2b3c4e";
    /// `orderIds(uint256)`
    pub const GET_ORDER_AT: &str = "5d6e7f8a";
    /// `getOrderViewByIndex(uint256)`
    pub const GET_ORDER_VIEW_BY_INDEX: &str = "2b4c6e8f";
    /// `isPlatformPaused()`
    pub const IS_PLATFORM_PAUSED: &str = "8c9d0e1f";
    /// `minOrderSize()`
    pub const MIN_ORDER_SIZE: &str = "1f2a3b4c";
    /// `feePercentBps()`
    pub const FEE_PERCENT_BPS: &str = "5d6e7f90";
}

/// `floor(price_per_unit * fill_amount / 1e18)`.
pub fn fill_value(price_per_unit: U256, fill_amount: U256) -> crate::Result<U256> {
    price_per_unit
        .checked_mul(fill_amount)
        .map(|product| product / PRICE_SCALE)
        .ok_or(crate::Error::Overflow("fill value"))
}

/// `floor(value * fee_bps / 10000)`.
pub fn fee_for(value: U256, fee_bps: u64) -> crate::Result<U256> {
    value
        .checked_mul(U256::from(fee_bps))
        .map(|product| product / U256::from(BPS_DENOMINATOR))
        .ok_or(crate::Error::Overflow("fee"))
}
