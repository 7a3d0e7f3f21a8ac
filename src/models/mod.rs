pub mod order;
pub mod stats;

pub use order::{AssetType, OrderStatus, OrderSummary, OrderView};
pub use stats::{FillQuote, PlatformStats};
