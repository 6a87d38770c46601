//! Price Formatting
//!
//! Reproduces `Intl.NumberFormat('pt-BR', { style: 'currency', currency: 'BRL' })`
//! exactly: `R$`, a no-break space, `.` between thousands, `,` before the
//! two decimals, and the minus sign ahead of the symbol.

use rust_decimal::Decimal;

pub const CURRENCY: &str = "BRL";

const SYMBOL: &str = "R$";
const NBSP: char = '\u{a0}';
const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Convert an amount in minor units (centavos) to reais
pub fn minor_to_decimal(minor_units: i64) -> Decimal {
    Decimal::new(minor_units, 2)
}

/// Format an amount in minor units as Brazilian Real
pub fn format_brl(minor_units: i64) -> String {
    let amount = minor_to_decimal(minor_units);
    let digits = format!("{:.2}", amount.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };

    format!(
        "{sign}{SYMBOL}{NBSP}{}{DECIMAL_SEPARATOR}{cents}",
        group_thousands(whole)
    )
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);

    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}
