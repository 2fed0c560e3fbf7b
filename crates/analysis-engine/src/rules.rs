//! Shared validation semantics.
//!
//! The per-category validation booleans are produced by the Text Analysis
//! Service, not recomputed locally; these functions are the canonical local
//! definition of the rules the prompts instruct the service to apply, and
//! the per-class check vocabularies embedded in each prompt.

use chrono::{Months, NaiveDate};
use shared_types::DocumentClass;

/// Validation check names, per class, in prompt order. Every list ends with
/// a `confidence_score` in the rendered prompt; that is part of the response
/// envelope, not a named check.
pub fn validation_checks(class: DocumentClass) -> &'static [&'static str] {
    match class {
        DocumentClass::Identity => &[
            "language",
            "age_check",
            "document_validity",
            "id_format",
            "nationality_check",
        ],
        DocumentClass::AddressProof => &[
            "language",
            "age_check",
            "document_validity",
            "address_check",
            "nationality_check",
        ],
        DocumentClass::Registration => &[
            "language",
            "age_check",
            "jurisdiction_check",
            "status_check",
            "entity_type_check",
        ],
        DocumentClass::Ownership => &[
            "language",
            "age_check",
            "jurisdiction_check",
            "ownership_percentage",
            "trustee_validation",
        ],
        DocumentClass::TaxReturn => &[
            "language",
            "age_check",
            "currency",
            "tax_amount",
            "due_tax_amount",
        ],
        DocumentClass::Financial => &["language", "age_check", "currency", "revenue", "payment"],
    }
}

/// `age_check`: true iff the reference date is within 3 calendar months of
/// the as-of date, in either direction. The boundary is inclusive: a
/// reference exactly 3 months away passes.
pub fn age_check(reference: NaiveDate, as_of: NaiveDate) -> bool {
    let lower = as_of.checked_sub_months(Months::new(3));
    let upper = as_of.checked_add_months(Months::new(3));
    match (lower, upper) {
        (Some(lower), Some(upper)) => reference >= lower && reference <= upper,
        _ => false,
    }
}

/// Cryptocurrency / virtual-wallet markers. Any of these in a stated
/// currency forces the `currency` check to false, regardless of what else
/// the value mentions.
const CRYPTO_KEYWORDS: &[&str] = &[
    "bitcoin", "btc", "ethereum", "eth", "crypto", "wallet", "token", "usdt", "usdc", "stablecoin",
    "dogecoin", "litecoin", "monero", "solana", "virtual currency",
];

/// Recognized fiat currency markers: ISO 4217 codes and common names.
const FIAT_KEYWORDS: &[&str] = &[
    // Codes
    "usd", "eur", "gbp", "inr", "jpy", "cny", "aud", "cad", "chf", "aed", "sgd", "hkd", "nzd",
    "sek", "nok", "dkk", "zar", "brl", "mxn", "krw", "try", "sar", "qar", "kwd", "bhd", "omr",
    "myr", "thb", "idr", "php", "pln", "huf", "czk", "ils", "rub", "ngn", "kes", "egp", "pkr",
    "bdt", "lkr", "vnd",
    // Names
    "dollar", "euro", "pound", "sterling", "rupee", "yen", "yuan", "renminbi", "franc", "dirham",
    "krona", "krone", "peso", "real", "rand", "won", "lira", "riyal", "rial", "dinar", "ringgit",
    "baht", "rupiah", "zloty", "forint", "koruna", "shekel", "ruble", "naira", "shilling",
    "taka", "dong",
];

/// `currency`: true iff the stated currency is a recognized real-world fiat
/// currency. Crypto or virtual-wallet mentions force false.
pub fn is_recognized_currency(value: &str) -> bool {
    let lowered = value.to_lowercase();
    if CRYPTO_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        return false;
    }
    FIAT_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

/// Monetary-amount checks (`revenue`, `tax_amount`, `payment`): strictly
/// positive.
pub fn is_positive_amount(amount: f64) -> bool {
    amount > 0.0
}

/// `due_tax_amount`: non-negative (a fully paid return is valid).
pub fn is_non_negative_amount(amount: f64) -> bool {
    amount >= 0.0
}
