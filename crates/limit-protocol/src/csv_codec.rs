// crates/limit-protocol/src/csv_codec.rs

//! CSV line codec.
//!
//! Input format (lines → `AgentCommand`):
//!
//! - New order:
//!   `N, side(B|S|buy|sell), product(string), qty(int > 0), limit(float)`
//!
//! - Price tick:
//!   `P, product(string), price(float)`
//!
//! - Query pending orders:
//!   `Q, product(string)`
//!
//! Output format (`OutputMessage` → line):
//!
//! - Ack:        `A, orderId, side(B/S), product, qty, limit`
//! - Reject:     `R, reason`
//! - Open order: `O, orderId, side(B/S), product, qty, limit`
//! - Executed:   `X, orderId, side(B/S), product, qty, limit, tickPrice`
//! - Failed:     `F, orderId, side(B/S), product, qty, limit, reason`
//! - Error:      `E, reason`

use std::num::{ParseFloatError, ParseIntError};

use limit_core::{AgentEvent, Side};
use thiserror::Error;

use crate::messages::{AgentCommand, NewOrder, OrderAck, OutputMessage, PriceTick};

/// Why a line could not be turned into a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown message type '{0}'")]
    UnknownMessageType(String),

    #[error("'{kind}' expects {expected} fields, got {got}")]
    FieldCount {
        kind: char,
        expected: usize,
        got: usize,
    },

    #[error("invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },
}

/// Parse a single CSV line into an `AgentCommand`.
///
/// Returns `Ok(None)` for blank lines or comments (starting with `#`).
pub fn parse_input_line(line: &str) -> Result<Option<AgentCommand>, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let tokens = split_and_trim(trimmed, ',');

    match tokens[0] {
        "N" => parse_new_order(&tokens).map(Some),
        "P" => parse_price_tick(&tokens).map(Some),
        "Q" => parse_query(&tokens).map(Some),
        other => Err(ProtocolError::UnknownMessageType(other.to_string())),
    }
}

fn parse_new_order(tokens: &[&str]) -> Result<AgentCommand, ProtocolError> {
    // N, side, product, qty, limit
    expect_fields('N', tokens, 5)?;

    let side = Side::parse(tokens[1]).ok_or_else(|| invalid("side", tokens[1]))?;
    let product_id = parse_product(tokens[2])?;
    let quantity = parse_u64(tokens[3]).map_err(|_| invalid("quantity", tokens[3]))?;
    let limit_price = parse_f64(tokens[4]).map_err(|_| invalid("limit price", tokens[4]))?;

    Ok(AgentCommand::NewOrder(NewOrder {
        side,
        product_id,
        quantity,
        limit_price,
    }))
}

fn parse_price_tick(tokens: &[&str]) -> Result<AgentCommand, ProtocolError> {
    // P, product, price
    expect_fields('P', tokens, 3)?;

    let product_id = parse_product(tokens[1])?;
    let price = parse_f64(tokens[2])
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| invalid("price", tokens[2]))?;

    Ok(AgentCommand::PriceTick(PriceTick { product_id, price }))
}

fn parse_query(tokens: &[&str]) -> Result<AgentCommand, ProtocolError> {
    // Q, product
    expect_fields('Q', tokens, 2)?;

    let product_id = parse_product(tokens[1])?;
    Ok(AgentCommand::QueryOrders { product_id })
}

/// Format an `OutputMessage` as a CSV line (no trailing newline).
pub fn format_output(msg: &OutputMessage) -> String {
    match msg {
        OutputMessage::Ack(a) => format!("A, {}", format_order_fields(a)),
        OutputMessage::Reject { reason } => format!("R, {}", sanitize(reason)),
        OutputMessage::OpenOrder(o) => format!("O, {}", format_order_fields(o)),
        OutputMessage::Event(AgentEvent::Executed(e)) => format!(
            "X, {}, {}, {}, {}, {}, {}",
            e.order_id,
            e.side.as_char(),
            e.product_id,
            e.quantity,
            e.limit_price,
            e.tick_price
        ),
        OutputMessage::Event(AgentEvent::ExecutionFailed(e)) => format!(
            "F, {}, {}, {}, {}, {}, {}",
            e.order_id,
            e.side.as_char(),
            e.product_id,
            e.quantity,
            e.limit_price,
            sanitize(&e.reason)
        ),
        OutputMessage::Error { reason } => format!("E, {}", sanitize(reason)),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn format_order_fields(o: &OrderAck) -> String {
    format!(
        "{}, {}, {}, {}, {}",
        o.order_id,
        o.side.as_char(),
        o.product_id,
        o.quantity,
        o.limit_price
    )
}

/// Free text must stay on one line and must not add columns.
fn sanitize(text: &str) -> String {
    text.replace([',', '\n', '\r'], " ")
}

fn expect_fields(kind: char, tokens: &[&str], expected: usize) -> Result<(), ProtocolError> {
    if tokens.len() != expected {
        return Err(ProtocolError::FieldCount {
            kind,
            expected,
            got: tokens.len(),
        });
    }
    Ok(())
}

fn invalid(field: &'static str, value: &str) -> ProtocolError {
    ProtocolError::InvalidField {
        field,
        value: value.to_string(),
    }
}

fn parse_product(s: &str) -> Result<String, ProtocolError> {
    if s.is_empty() {
        return Err(invalid("product", s));
    }
    Ok(s.to_string())
}

fn split_and_trim(s: &str, delimiter: char) -> Vec<&str> {
    s.split(delimiter).map(str::trim).collect()
}

fn parse_u64(s: &str) -> Result<u64, ParseIntError> {
    s.parse::<u64>()
}

fn parse_f64(s: &str) -> Result<f64, ParseFloatError> {
    s.parse::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use limit_core::{Executed, ExecutionFailed, OrderId};

    #[test]
    fn parses_new_order_in_both_side_forms() {
        let cmd = parse_input_line("N, B, IBM, 1000, 100.0").unwrap().unwrap();
        assert_eq!(
            cmd,
            AgentCommand::NewOrder(NewOrder {
                side: Side::Buy,
                product_id: "IBM".to_string(),
                quantity: 1000,
                limit_price: 100.0,
            })
        );

        let cmd = parse_input_line("N,sell,AAPL,5,187.25").unwrap().unwrap();
        assert!(matches!(
            cmd,
            AgentCommand::NewOrder(NewOrder { side: Side::Sell, quantity: 5, .. })
        ));
    }

    #[test]
    fn parses_tick_and_query() {
        assert_eq!(
            parse_input_line(" P, IBM, 99.5 ").unwrap(),
            Some(AgentCommand::PriceTick(PriceTick {
                product_id: "IBM".to_string(),
                price: 99.5,
            }))
        );
        assert_eq!(
            parse_input_line("Q, IBM").unwrap(),
            Some(AgentCommand::QueryOrders {
                product_id: "IBM".to_string()
            })
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_input_line("   ").unwrap(), None);
        assert_eq!(parse_input_line("# scenario A").unwrap(), None);
    }

    #[test]
    fn reports_malformed_lines() {
        assert_eq!(
            parse_input_line("Z, IBM"),
            Err(ProtocolError::UnknownMessageType("Z".to_string()))
        );
        assert_eq!(
            parse_input_line("P, IBM"),
            Err(ProtocolError::FieldCount {
                kind: 'P',
                expected: 3,
                got: 2
            })
        );
        assert!(matches!(
            parse_input_line("N, X, IBM, 10, 1.0"),
            Err(ProtocolError::InvalidField { field: "side", .. })
        ));
        assert!(matches!(
            parse_input_line("N, B, IBM, -10, 1.0"),
            Err(ProtocolError::InvalidField { field: "quantity", .. })
        ));
        assert!(matches!(
            parse_input_line("P, IBM, NaN"),
            Err(ProtocolError::InvalidField { field: "price", .. })
        ));
        assert!(matches!(
            parse_input_line("P, , 10"),
            Err(ProtocolError::InvalidField { field: "product", .. })
        ));
    }

    #[test]
    fn formats_events() {
        let executed = OutputMessage::Event(AgentEvent::Executed(Executed {
            order_id: OrderId(3),
            side: Side::Sell,
            product_id: "IBM".to_string(),
            quantity: 1000,
            limit_price: 100.0,
            tick_price: 101.5,
        }));
        assert_eq!(format_output(&executed), "X, 3, S, IBM, 1000, 100, 101.5");

        let failed = OutputMessage::Event(AgentEvent::ExecutionFailed(ExecutionFailed {
            order_id: OrderId(1),
            side: Side::Buy,
            product_id: "IBM".to_string(),
            quantity: 10,
            limit_price: 99.5,
            reason: "rejected: halted, try later".to_string(),
        }));
        assert_eq!(
            format_output(&failed),
            "F, 1, B, IBM, 10, 99.5, rejected: halted  try later"
        );
    }

    #[test]
    fn formats_replies() {
        let ack = OrderAck {
            order_id: OrderId(7),
            side: Side::Buy,
            product_id: "AAPL".to_string(),
            quantity: 1,
            limit_price: 187.25,
        };
        assert_eq!(format_output(&OutputMessage::Ack(ack.clone())), "A, 7, B, AAPL, 1, 187.25");
        assert_eq!(format_output(&OutputMessage::OpenOrder(ack)), "O, 7, B, AAPL, 1, 187.25");
        assert_eq!(
            format_output(&OutputMessage::Reject {
                reason: "quantity must be positive".to_string()
            }),
            "R, quantity must be positive"
        );
    }
}
