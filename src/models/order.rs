use std::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::Serialize;

use crate::error::{Error, Result};

/// What an order trades. Stored on-chain as a `uint8` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    Crypto,
    RealWorldAsset,
}

impl AssetType {
    pub fn from_discriminant(value: u64) -> Result<Self> {
        match value {
            0 => Ok(AssetType::Crypto),
            1 => Ok(AssetType::RealWorldAsset),
            _ => Err(Error::InvalidDiscriminant { field: "asset type", value }),
        }
    }

    pub fn discriminant(self) -> u64 {
        match self {
            AssetType::Crypto => 0,
            AssetType::RealWorldAsset => 1,
        }
    }
}

/// Contract-side order lifecycle: OPEN moves to FILLED or CANCELLED, both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn from_discriminant(value: u64) -> Result<Self> {
        match value {
            0 => Ok(OrderStatus::Open),
            1 => Ok(OrderStatus::Filled),
            2 => Ok(OrderStatus::Cancelled),
            _ => Err(Error::InvalidDiscriminant { field: "status", value }),
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Open)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderStatus::Open => "OPEN",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
        })
    }
}

/// Full on-chain view of a single order, as returned by `getOrderView`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderView {
    pub id: B256,
    pub maker: Address,
    pub asset_type: AssetType,
    pub asset_id: B256,
    pub amount: U256,
    /// Price per unit, fixed point with 18 decimals.
    pub price_per_unit: U256,
    /// true = maker sells the asset, false = maker buys it
    pub is_sell: bool,
    pub filled_amount: U256,
    pub status: OrderStatus,
    /// Unix seconds
    pub created_at: u64,
}

impl OrderView {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    /// Unfilled quantity. Saturates at zero if the contract ever reports an
    /// overfill.
    pub fn remaining(&self) -> U256 {
        self.amount.saturating_sub(self.filled_amount)
    }

    pub fn side(&self) -> &'static str {
        if self.is_sell { "SELL" } else { "BUY" }
    }
}

/// Batch-listing projection of [`OrderView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub id: B256,
    pub maker: Address,
    pub amount: U256,
    pub price_per_unit: U256,
    pub is_sell: bool,
    pub filled_amount: U256,
    pub status: OrderStatus,
}

impl OrderSummary {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }

    pub fn remaining(&self) -> U256 {
        self.amount.saturating_sub(self.filled_amount)
    }
}

impl From<&OrderView> for OrderSummary {
    fn from(view: &OrderView) -> Self {
        Self {
            id: view.id,
            maker: view.maker,
            amount: view.amount,
            price_per_unit: view.price_per_unit,
            is_sell: view.is_sell,
            filled_amount: view.filled_amount,
            status: view.status,
        }
    }
}
