//! Unsigned transaction payloads for the state-changing Otc entry points.
//!
//! These only assemble `to` + call data; signing and broadcasting are left to
//! whatever wallet the caller uses.

use alloy_primitives::{Address, B256, U256};
use serde::Serialize;

use super::codec;
use super::selectors;
use crate::error::Result;
use crate::models::AssetType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxPayload {
    pub to: Address,
    /// `0x` + selector + argument words
    pub data: String,
}

pub fn post_order(
    contract: Address,
    asset_type: AssetType,
    asset_id: &B256,
    amount: U256,
    price_per_unit: U256,
    is_sell: bool,
) -> TxPayload {
    TxPayload {
        to: contract,
        data: codec::call_data(
            selectors::POST_ORDER,
            &[
                codec::encode_uint(U256::from(asset_type.discriminant())),
                codec::encode_bytes32(asset_id),
                codec::encode_uint(amount),
                codec::encode_uint(price_per_unit),
                codec::encode_bool(is_sell),
            ],
        ),
    }
}

pub fn fill_order(contract: Address, order_id: &B256, fill_amount: U256) -> TxPayload {
    TxPayload {
        to: contract,
        data: codec::call_data(
            selectors::FILL_ORDER,
            &[codec::encode_bytes32(order_id), codec::encode_uint(fill_amount)],
        ),
    }
}

pub fn cancel_order(contract: Address, order_id: &B256) -> TxPayload {
    TxPayload {
        to: contract,
        data: codec::call_data(selectors::CANCEL_ORDER, &[codec::encode_bytes32(order_id)]),
    }
}

/// [`post_order`] taking the asset id as a `0x`-prefixed 32-byte hex string.
pub fn post_order_str(
    contract: Address,
    asset_type: AssetType,
    asset_id: &str,
    amount: U256,
    price_per_unit: U256,
    is_sell: bool,
) -> Result<TxPayload> {
    let asset_id = crate::utils::parse_order_id(asset_id)?;
    Ok(post_order(contract, asset_type, &asset_id, amount, price_per_unit, is_sell))
}

pub fn fill_order_str(contract: Address, order_id: &str, fill_amount: U256) -> Result<TxPayload> {
    let order_id = crate::utils::parse_order_id(order_id)?;
    Ok(fill_order(contract, &order_id, fill_amount))
}

pub fn cancel_order_str(contract: Address, order_id: &str) -> Result<TxPayload> {
    let order_id = crate::utils::parse_order_id(order_id)?;
    Ok(cancel_order(contract, &order_id))
}
