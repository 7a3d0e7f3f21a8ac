//! # transacto-rs
//!
//! A Rust client for the Otc over-the-counter trading contract.
//! Reads orders and platform parameters through `eth_call` over JSON-RPC and
//! builds unsigned payloads for posting, filling and cancelling orders.
//!
//! ## Contract surface
//!
//! | Call | Kind | Client method |
//! |------|------|---------------|
//! | `getOrderIdsLength()` | view | [`OtcClient::order_count`] |
//! | `orderIds(uint256)` | view | [`OtcClient::order_id_at`] |
//! | `getOrderView(bytes32)` | view | [`OtcClient::order_view`] |
//! | `getOrderViewByIndex(uint256)` | view | [`OtcClient::order_view_by_index`] |
//! | `getOrderSummariesBatch(uint256,uint256)` | view | [`OtcClient::order_summaries`] |
//! | `isPlatformPaused()` | view | [`OtcClient::is_paused`] |
//! | `minOrderSize()` | view | [`OtcClient::min_order_size`] |
//! | `feePercentBps()` | view | [`OtcClient::fee_bps`] |
//! | `postOrder(...)` | tx | [`otc::payload::post_order`] |
//! | `fillOrder(bytes32,uint256)` | tx | [`otc::payload::fill_order`] |
//! | `cancelOrder(bytes32)` | tx | [`otc::payload::cancel_order`] |
//!
//! ## Quick Start
//!
//! ```no_run
//! use transacto_rs::{OtcClient, OtcConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OtcConfig::default().with_rpc_url("http://localhost:8545");
//!     let client = OtcClient::new(&config)?;
//!
//!     let stats = client.platform_stats().await?;
//!     println!("{} orders, {} open", stats.total_orders, stats.open_orders);
//!
//!     for order in client.order_summaries(0, 10).await? {
//!         println!("{} {} {}", order.id, order.status, order.remaining());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! cargo run --release -- stats
//! cargo run --release -- list 0 20
//! cargo run --release -- order 0x<64 hex>
//! cargo run --release -- cancel 0x<64 hex>
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod otc;
pub mod rpc;
pub mod utils;

pub use config::OtcConfig;
pub use error::{Error, Result};
pub use models::{AssetType, FillQuote, OrderStatus, OrderSummary, OrderView, PlatformStats};
pub use otc::{OtcClient, TxPayload};
pub use rpc::{RpcApi, RpcTransport};
