//! Currency symbols and fixed-digit rendering

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref CURRENCY_SYMBOLS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("CNY", "¥");
        m.insert("USD", "$");
        m.insert("EUR", "€");
        m.insert("GBP", "£");
        m.insert("AED", "د.إ");
        m.insert("AUD", "A$");
        m.insert("BRL", "R$");
        m.insert("CAD", "C$");
        m.insert("CHF", "CHF");
        m.insert("HKD", "HK$");
        m.insert("INR", "₹");
        m.insert("IDR", "Rp");
        m.insert("JPY", "¥");
        m.insert("KRW", "₩");
        m.insert("MOP", "MOP$");
        m.insert("MXN", "MX$");
        m.insert("MYR", "RM");
        m.insert("PHP", "₱");
        m.insert("PLN", "zł");
        m.insert("RUB", "₽");
        m.insert("SGD", "S$");
        m.insert("THB", "฿");
        m.insert("TRY", "₺");
        m.insert("TWD", "NT$");
        m.insert("VND", "₫");
        m
    };
}

/// Symbol for an ISO currency code; unknown codes render as the code itself
pub fn currency_symbol(code: &str) -> &str {
    CURRENCY_SYMBOLS
        .get(code.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(code)
}

/// Largest fraction-digit count a currency field may ask for
pub const MAX_FRACTION_DIGITS: u32 = 100;

// Enough places to print any finite f64 without rounding
const EXACT_PLACES: usize = 1100;

/// `<symbol><value fixed to digits>`
pub fn format_currency(code: &str, value: f64, digits: u32) -> String {
    format!("{}{}", currency_symbol(code), to_fixed(value, digits))
}

/// Fixed-point rendering of the exact binary value, ties away from zero
/// (`2.5` -> `3`, while `1.005` is stored below the tie and gives `1.00`)
pub fn to_fixed(value: f64, digits: u32) -> String {
    let digits = digits.min(MAX_FRACTION_DIGITS) as usize;
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_PLACES, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let frac = frac_part.as_bytes();

    let mut kept: Vec<u8> = int_part.bytes().chain(frac[..digits].iter().copied()).collect();
    if frac.get(digits).is_some_and(|d| *d >= b'5') {
        round_up(&mut kept);
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(std::str::from_utf8(&kept[..split]).unwrap_or("0"));
    if digits > 0 {
        out.push('.');
        out.push_str(std::str::from_utf8(&kept[split..]).unwrap_or(""));
    }
    out
}

fn round_up(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
