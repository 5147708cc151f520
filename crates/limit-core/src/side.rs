//! Side (Buy / Sell) for limit orders.

use std::fmt;

/// Order side: Buy or Sell.
///
/// A buy triggers when the market trades at or below its limit,
/// a sell when the market trades at or above it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Convert to the compact char representation (`'B'` / `'S'`)
    /// used on the line protocol.
    pub fn as_char(self) -> char {
        match self {
            Side::Buy => 'B',
            Side::Sell => 'S',
        }
    }

    /// Try to parse from a char (`'B'` / `'S'`, case-sensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'B' => Some(Side::Buy),
            'S' => Some(Side::Sell),
            _ => None,
        }
    }

    /// Parse either the char form or the word form (`buy` / `sell`,
    /// case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("buy") {
            return Some(Side::Buy);
        }
        if s.eq_ignore_ascii_case("sell") {
            return Some(Side::Sell);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Side::from_char(c),
            _ => None,
        }
    }

    /// Whether a market `price` satisfies a limit of `limit_price` on this side.
    ///
    /// Comparisons are plain IEEE ones, so a NaN price is never favorable.
    pub fn is_favorable(self, price: f64, limit_price: f64) -> bool {
        match self {
            Side::Buy => price <= limit_price,
            Side::Sell => price >= limit_price,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("buy"),
            Side::Sell => f.write_str("sell"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_char_and_word_forms() {
        assert_eq!(Side::parse("B"), Some(Side::Buy));
        assert_eq!(Side::parse("S"), Some(Side::Sell));
        assert_eq!(Side::parse(" buy "), Some(Side::Buy));
        assert_eq!(Side::parse("SELL"), Some(Side::Sell));
        assert_eq!(Side::parse("b"), None);
        assert_eq!(Side::parse("BS"), None);
        assert_eq!(Side::parse(""), None);
    }

    #[test]
    fn buy_is_favorable_at_or_below_limit() {
        assert!(Side::Buy.is_favorable(99.0, 100.0));
        assert!(Side::Buy.is_favorable(100.0, 100.0));
        assert!(!Side::Buy.is_favorable(100.01, 100.0));
    }

    #[test]
    fn sell_is_favorable_at_or_above_limit() {
        assert!(Side::Sell.is_favorable(101.0, 100.0));
        assert!(Side::Sell.is_favorable(100.0, 100.0));
        assert!(!Side::Sell.is_favorable(99.99, 100.0));
    }

    #[test]
    fn nan_price_is_never_favorable() {
        assert!(!Side::Buy.is_favorable(f64::NAN, 100.0));
        assert!(!Side::Sell.is_favorable(f64::NAN, 100.0));
    }
}
