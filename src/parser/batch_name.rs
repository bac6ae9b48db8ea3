//! Decoding of batch-encoded fronctocol names.
//!
//! A batched fronctocol is named `"Batch size: <N> of " + <inner>`, where
//! `<inner>` may itself be batched. The leaf is the plain type name.

use crate::utils::config::{BATCH_PREFIX, BATCH_SEPARATOR};
use serde::{Deserialize, Serialize};

/// A fully unwrapped batch name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchName {
    /// Number of batch prefixes
    pub depth: usize,

    /// Product of all batch sizes (1 when unbatched)
    pub total: u64,

    /// Name with every batch prefix removed
    pub leaf: String,
}

impl BatchName {
    /// Decode a timer name
    pub fn decode(name: &str) -> Self {
        let mut depth = 0;
        let mut total: u64 = 1;
        let mut rest = name;

        while let Some((size, inner)) = split_prefix(rest) {
            depth += 1;
            total = total.saturating_mul(size);
            rest = inner;
        }

        Self {
            depth,
            total,
            leaf: rest.to_string(),
        }
    }
}

/// Split one `"Batch size: <N> of "` prefix off `name`
fn split_prefix(name: &str) -> Option<(u64, &str)> {
    let after = name.strip_prefix(BATCH_PREFIX)?;
    let digits_len = after.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let (digits, tail) = after.split_at(digits_len);
    let inner = tail.strip_prefix(BATCH_SEPARATOR)?;
    // Oversized counts saturate rather than stopping the unwrap
    let size = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some((size, inner))
}

/// Number of batch prefixes on `name`
pub fn batch_depth(name: &str) -> usize {
    BatchName::decode(name).depth
}

/// Product of all batch sizes on `name` (1 if unbatched)
pub fn batch_total(name: &str) -> u64 {
    BatchName::decode(name).total
}

/// `name` with every batch prefix stripped
pub fn batch_type(name: &str) -> String {
    BatchName::decode(name).leaf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_batch() {
        let name = "Batch size: 3 of Batch size: 4 of Leaf";
        assert_eq!(batch_total(name), 12);
        assert_eq!(batch_depth(name), 2);
        assert_eq!(batch_type(name), "Leaf");
    }

    #[test]
    fn test_unbatched() {
        assert_eq!(
            BatchName::decode("Leaf"),
            BatchName {
                depth: 0,
                total: 1,
                leaf: "Leaf".to_string(),
            }
        );
    }

    #[test]
    fn test_prefix_without_separator_is_leaf() {
        let decoded = BatchName::decode("Batch size: 3");
        assert_eq!(decoded.depth, 0);
        assert_eq!(decoded.total, 1);
        assert_eq!(decoded.leaf, "Batch size: 3");
    }

    #[test]
    fn test_prefix_without_digits_is_leaf() {
        assert_eq!(batch_depth("Batch size: of Leaf"), 0);
    }

    #[test]
    fn test_zero_batch_size() {
        let decoded = BatchName::decode("Batch size: 0 of Multiply");
        assert_eq!(decoded.depth, 1);
        assert_eq!(decoded.total, 0);
        assert_eq!(decoded.leaf, "Multiply");
    }

    #[test]
    fn test_huge_batch_saturates() {
        let name = "Batch size: 99999999999999999999999 of Batch size: 2 of Leaf";
        assert_eq!(batch_total(name), u64::MAX);
        assert_eq!(batch_depth(name), 2);
    }
}
