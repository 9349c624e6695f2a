use serde::{Deserialize, Serialize};
use strum::Display;

use crate::errors::HealError;

/// Redundancy health of a heal result, ordered from least to most safe.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "lowercase")]
pub enum HealthColor {
    Grey,
    Red,
    Yellow,
    Green,
}

impl HealthColor {
    pub const ALL: [HealthColor; 4] = [
        HealthColor::Grey,
        HealthColor::Red,
        HealthColor::Yellow,
        HealthColor::Green,
    ];

    pub fn as_lower_str(&self) -> &'static str {
        match self {
            HealthColor::Grey => "grey",
            HealthColor::Red => "red",
            HealthColor::Yellow => "yellow",
            HealthColor::Green => "green",
        }
    }
}

// Colors a surplus threshold resolves to, in lookup order.
const COLOR_ORDER: [HealthColor; 3] = [HealthColor::Red, HealthColor::Yellow, HealthColor::Green];

pub const MIN_PARITY: i64 = 1;
pub const MAX_PARITY: i64 = 8;

/// Surplus-shard thresholds for red, yellow and green, indexed by
/// `parity - 1`. `None` skips the color for that parity.
///
/// Every row is non-decreasing and its green threshold equals the parity, so
/// each `0 <= surplus <= parity` resolves to a color.
pub const PARITY_TIE_BREAK_TABLE: [[Option<i64>; 3]; 8] = [
    [Some(0), None, Some(1)],
    [Some(0), Some(1), Some(2)],
    [Some(1), Some(2), Some(3)],
    [Some(1), Some(2), Some(4)],
    [Some(1), Some(3), Some(5)],
    [Some(2), Some(4), Some(6)],
    [Some(2), Some(4), Some(7)],
    [Some(2), Some(5), Some(8)],
];

/// Maps the surplus of available shards over the degradation threshold to a
/// health color for an erasure set with `parity_shards` parity shards.
///
/// A negative surplus means the item is not tracked for degradation and
/// yields `Grey`.
pub fn classify(surplus_shards: i64, parity_shards: i64) -> Result<HealthColor, HealError> {
    classify_with(&PARITY_TIE_BREAK_TABLE, surplus_shards, parity_shards)
}

pub(crate) fn classify_with(
    table: &[[Option<i64>; 3]; 8],
    surplus_shards: i64,
    parity_shards: i64,
) -> Result<HealthColor, HealError> {
    if parity_shards < MIN_PARITY || parity_shards > MAX_PARITY || surplus_shards > parity_shards {
        return Err(HealError::InvalidParity {
            surplus: surplus_shards,
            parity: parity_shards,
        });
    }
    if surplus_shards < 0 {
        return Ok(HealthColor::Grey);
    }
    let row = &table[(parity_shards - MIN_PARITY) as usize];
    row.iter()
        .zip(COLOR_ORDER.iter())
        .find_map(|(threshold, color)| match threshold {
            Some(threshold) if surplus_shards <= *threshold => Some(*color),
            _ => None,
        })
        .ok_or(HealError::Classification {
            surplus: surplus_shards,
            parity: parity_shards,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_valid_range() {
        for parity in MIN_PARITY..=MAX_PARITY {
            for surplus in 0..=parity {
                let color = classify(surplus, parity).unwrap();
                assert_ne!(color, HealthColor::Grey, "surplus {} parity {}", surplus, parity);
            }
        }
    }

    #[test]
    fn test_classify_negative_surplus_is_grey() {
        for parity in MIN_PARITY..=MAX_PARITY {
            assert_eq!(classify(-1, parity).unwrap(), HealthColor::Grey);
        }
    }

    #[test]
    fn test_classify_invalid_parity() {
        let cases = [(0, 0), (0, 9), (-1, -3), (3, 2), (9, 8)];
        for (surplus, parity) in cases.iter() {
            assert!(matches!(
                classify(*surplus, *parity),
                Err(HealError::InvalidParity { .. })
            ));
        }
    }

    #[test]
    fn test_classify_monotonic() {
        for parity in MIN_PARITY..=MAX_PARITY {
            for s1 in 0..=parity {
                for s2 in 0..s1 {
                    assert!(classify(s1, parity).unwrap() >= classify(s2, parity).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_classify_table_values() {
        let cases = [
            (0, 1, HealthColor::Red),
            (1, 1, HealthColor::Green),
            (1, 2, HealthColor::Yellow),
            (0, 3, HealthColor::Red),
            (2, 3, HealthColor::Yellow),
            (3, 3, HealthColor::Green),
            (3, 5, HealthColor::Yellow),
            (4, 5, HealthColor::Green),
            (2, 8, HealthColor::Red),
            (5, 8, HealthColor::Yellow),
            (6, 8, HealthColor::Green),
        ];
        for (surplus, parity, expected) in cases.iter() {
            assert_eq!(classify(*surplus, *parity).unwrap(), *expected);
        }
    }

    #[test]
    fn test_classify_malformed_row() {
        let mut table = PARITY_TIE_BREAK_TABLE;
        table[3] = [Some(0), None, Some(1)];
        assert!(matches!(
            classify_with(&table, 3, 4),
            Err(HealError::Classification { surplus: 3, parity: 4 })
        ));
    }

    #[test]
    fn test_color_order_and_names() {
        assert!(HealthColor::Grey < HealthColor::Red);
        assert!(HealthColor::Red < HealthColor::Yellow);
        assert!(HealthColor::Yellow < HealthColor::Green);
        assert_eq!(HealthColor::Yellow.to_string(), "Yellow");
        assert_eq!(HealthColor::Yellow.as_lower_str(), "yellow");
        assert_eq!(serde_json::to_string(&HealthColor::Grey).unwrap(), r#""grey""#);
    }
}
