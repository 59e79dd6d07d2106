// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword categorization of free-text transaction descriptions.

use crate::models::Category;

/// Checked top to bottom; the first category with a keyword hit wins.
const KEYWORD_RULES: &[(Category, &[&str])] = &[
    (
        Category::Investment,
        &["zerodha", "groww", "stocks", "sip", "mutual fund", "etf"],
    ),
    (
        Category::Food,
        &["chai", "zomato", "swiggy", "mess", "canteen", "restaurant", "cafe"],
    ),
    (
        Category::Fixed,
        &["rent", "fees", "hostel", "electricity", "internet", "subscription"],
    ),
    (
        Category::Transport,
        &["uber", "ola", "metro", "bus", "fuel", "petrol"],
    ),
    (
        Category::Shopping,
        &["amazon", "flipkart", "myntra", "shopping", "clothes"],
    ),
    (
        Category::Entertainment,
        &["netflix", "spotify", "movie", "theatre", "game"],
    ),
];

pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_keyword(&desc, k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Variable)
}

/// Substring match anchored at the start of a word, so "etf" does not fire
/// inside "netflix" while "amazonpay" still matches "amazon".
fn contains_keyword(haystack: &str, keyword: &str) -> bool {
    haystack.match_indices(keyword).any(|(i, _)| {
        haystack[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_beats_entertainment() {
        assert_eq!(categorize("Netflix subscription payment"), Category::Fixed);
        assert_eq!(categorize("Netflix"), Category::Entertainment);
    }

    #[test]
    fn matches_are_case_insensitive_substrings() {
        assert_eq!(categorize("ZOMATO ORDER #44"), Category::Food);
        assert_eq!(categorize("Monthly SIP - Groww"), Category::Investment);
        assert_eq!(categorize("Hostel Rent March"), Category::Fixed);
        assert_eq!(categorize("Uber trip"), Category::Transport);
        assert_eq!(categorize("Flipkart order"), Category::Shopping);
    }

    #[test]
    fn investment_has_top_priority() {
        // "etf" and "cafe" both present
        assert_eq!(categorize("ETF purchase at cafe"), Category::Investment);
    }

    #[test]
    fn keywords_must_start_a_word() {
        assert_eq!(categorize("Current account interest"), Category::Variable);
        assert_eq!(categorize("UPI-ZOMATO-8812"), Category::Food);
        assert_eq!(categorize("amazonpay wallet"), Category::Shopping);
        // keywords inside a word do not count
        assert_eq!(categorize("Endgame tickets"), Category::Variable);
        assert_eq!(categorize("Minibus fare"), Category::Variable);
    }

    #[test]
    fn unmatched_falls_back_to_variable() {
        assert_eq!(categorize("Transfer to friend"), Category::Variable);
        assert_eq!(categorize(""), Category::Variable);
    }
}
