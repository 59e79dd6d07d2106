// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Amount extraction from OCR'd receipt text. The OCR itself happens elsewhere.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static RECEIPT_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:₹|INR|RS|Rs\.?)\s?(\d+(?:,\d{3})*(?:\.\d{1,2})?)").expect("static regex")
});

/// First currency-prefixed amount in the text, if any.
pub fn extract_amount(text: &str) -> Option<Decimal> {
    let caps = RECEIPT_AMOUNT.captures(text)?;
    caps.get(1)?.as_str().replace(',', "").parse::<Decimal>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn finds_rupee_amounts() {
        let text = "CAFE COFFEE DAY\nItems 3\nTotal ₹1,249.50\nThank you";
        assert_eq!(extract_amount(text), Some(Decimal::from_str("1249.50").unwrap()));
        assert_eq!(extract_amount("Grand total Rs. 320"), Some(Decimal::from(320)));
        assert_eq!(extract_amount("amount inr 75.5"), Some(Decimal::from_str("75.5").unwrap()));
    }

    #[test]
    fn no_currency_marker_means_no_amount() {
        assert_eq!(extract_amount("Total 1249.50"), None);
        assert_eq!(extract_amount(""), None);
    }
}
