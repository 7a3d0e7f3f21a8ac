//! Fixed-width word codec for the Otc calling convention.
//!
//! Arguments and return values are flat sequences of 32-byte big-endian
//! words. The contract's view functions return fixed-layout structs, so
//! records are decoded by word offset; there is no dynamic-offset handling.

use alloy_primitives::{Address, B256, U256};

use crate::error::{Error, Result};
use crate::models::{AssetType, OrderStatus, OrderSummary, OrderView};

pub const WORD_BYTES: usize = 32;
pub const ORDER_VIEW_WORDS: usize = 10;
pub const ORDER_SUMMARY_WORDS: usize = 7;

/// Left-pad a hex string with zeros to `width * 2` characters.
///
/// An optional `0x` prefix is dropped. Input longer than the target is cut
/// down to its low-order `width * 2` characters, the same wraparound a
/// fixed-width integer would apply.
pub fn pad_to(value: &str, width: usize) -> String {
    let digits = value.strip_prefix("0x").unwrap_or(value).to_ascii_lowercase();
    let target = width * 2;
    // counted in chars so non-ASCII input cannot split a code point
    let count = digits.chars().count();
    if count >= target {
        digits.chars().skip(count - target).collect()
    } else {
        format!("{}{}", "0".repeat(target - count), digits)
    }
}

pub fn encode_address(address: &Address) -> String {
    pad_to(&hex::encode(address.as_slice()), WORD_BYTES)
}

pub fn encode_bytes32(value: &B256) -> String {
    hex::encode(value.as_slice())
}

pub fn encode_uint(value: U256) -> String {
    pad_to(&format!("{value:x}"), WORD_BYTES)
}

pub fn encode_bool(value: bool) -> String {
    encode_uint(U256::from(value as u8))
}

/// `0x` + selector + argument words.
pub fn call_data(selector: &str, words: &[String]) -> String {
    let mut data = String::with_capacity(2 + 8 + words.len() * WORD_BYTES * 2);
    data.push_str("0x");
    data.push_str(selector.strip_prefix("0x").unwrap_or(selector));
    for word in words {
        data.push_str(word);
    }
    data
}

/// Decode an `eth_call` result string (`0x`-prefixed hex) into raw bytes.
pub fn decode_hex_result(result: &str) -> Result<Vec<u8>> {
    let digits = result.strip_prefix("0x").unwrap_or(result);
    hex::decode(digits).map_err(|e| Error::InvalidHex(format!("{}: {}", e, truncate(result))))
}

fn truncate(s: &str) -> &str {
    match s.char_indices().nth(24) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Read-only view over a buffer of concatenated 32-byte words.
#[derive(Debug, Clone, Copy)]
pub struct Words<'a> {
    data: &'a [u8],
}

impl<'a> Words<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Number of complete words in the buffer.
    pub fn len(&self) -> usize {
        self.data.len() / WORD_BYTES
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fail with `ShortResponse` unless at least `count` words are present.
    pub fn require(&self, count: usize) -> Result<()> {
        let needed = count * WORD_BYTES;
        if self.data.len() < needed {
            return Err(Error::ShortResponse { needed, got: self.data.len() });
        }
        Ok(())
    }

    pub fn word(&self, index: usize) -> Result<&'a [u8]> {
        self.require(index + 1)?;
        let start = index * WORD_BYTES;
        Ok(&self.data[start..start + WORD_BYTES])
    }

    pub fn uint(&self, index: usize) -> Result<U256> {
        Ok(U256::from_be_slice(self.word(index)?))
    }

    pub fn u64(&self, index: usize) -> Result<u64> {
        let value = self.uint(index)?;
        let limbs = value.as_limbs();
        if limbs[1..].iter().any(|&limb| limb != 0) {
            return Err(Error::Overflow("u64 word"));
        }
        Ok(limbs[0])
    }

    /// Low-order 20 bytes of the word.
    pub fn address(&self, index: usize) -> Result<Address> {
        Ok(Address::from_slice(&self.word(index)?[12..]))
    }

    pub fn bytes32(&self, index: usize) -> Result<B256> {
        Ok(B256::from_slice(self.word(index)?))
    }

    /// Any non-zero word is true.
    pub fn bool(&self, index: usize) -> Result<bool> {
        Ok(self.word(index)?.iter().any(|&b| b != 0))
    }

    /// Sub-view starting at word `index`.
    pub fn slice_from(&self, index: usize) -> Words<'a> {
        let start = (index * WORD_BYTES).min(self.data.len());
        Words { data: &self.data[start..] }
    }
}

/// Decode a `getOrderView` result:
///   [id, maker, assetType, assetId, amount, pricePerUnit, isSell,
///    filledAmount, status, createdAt]
pub fn decode_order_view(data: &[u8]) -> Result<OrderView> {
    let w = Words::new(data);
    w.require(ORDER_VIEW_WORDS)?;
    Ok(OrderView {
        id: w.bytes32(0)?,
        maker: w.address(1)?,
        asset_type: AssetType::from_discriminant(w.u64(2)?)?,
        asset_id: w.bytes32(3)?,
        amount: w.uint(4)?,
        price_per_unit: w.uint(5)?,
        is_sell: w.bool(6)?,
        filled_amount: w.uint(7)?,
        status: OrderStatus::from_discriminant(w.u64(8)?)?,
        created_at: w.u64(9)?,
    })
}

/// Decode one summary record:
///   [id, maker, amount, pricePerUnit, isSell, filledAmount, status]
pub fn decode_order_summary(w: Words<'_>) -> Result<OrderSummary> {
    w.require(ORDER_SUMMARY_WORDS)?;
    Ok(OrderSummary {
        id: w.bytes32(0)?,
        maker: w.address(1)?,
        amount: w.uint(2)?,
        price_per_unit: w.uint(3)?,
        is_sell: w.bool(4)?,
        filled_amount: w.uint(5)?,
        status: OrderStatus::from_discriminant(w.u64(6)?)?,
    })
}

/// Decode a batch buffer of back-to-back summary records. A trailing partial
/// record is dropped.
pub fn decode_order_summaries(data: &[u8]) -> Result<Vec<OrderSummary>> {
    let w = Words::new(data);
    let count = w.len() / ORDER_SUMMARY_WORDS;
    (0..count)
        .map(|i| decode_order_summary(w.slice_from(i * ORDER_SUMMARY_WORDS)))
        .collect()
}
