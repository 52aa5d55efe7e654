//! Random-but-valid-format test data.
//!
//! Every scenario run mints its own identities and content from these
//! helpers, so re-running a suite never collides with residue from a
//! previous run. Nothing here keeps state between calls.

use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};

const FIRST_NAMES: &[&str] = &[
    "jiwoo", "minseo", "hana", "daniel", "sofia", "marcus", "elena", "tomas", "yuna", "pavel",
];

const NOUNS: &[&str] = &[
    "kettle", "lantern", "satchel", "teapot", "notebook", "sandal", "umbrella", "compass",
    "cushion", "thermos",
];

const ADJECTIVES: &[&str] = &[
    "copper", "woven", "matte", "foldable", "insulated", "vintage", "compact", "ceramic",
    "brushed", "quilted",
];

/// Lowercase alphanumeric string of the given length.
pub fn alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();
    Alphanumeric
        .sample_string(&mut rng, len)
        .to_ascii_lowercase()
}

/// Valid-format random email under the given domain.
pub fn email(domain: &str) -> String {
    format!("{}.{}@{}", pick(FIRST_NAMES), alphanumeric(8), domain)
}

/// Password satisfying typical length/character-class checks.
pub fn password() -> String {
    let mut rng = rand::rng();
    format!(
        "Pw{}!{}",
        Alphanumeric.sample_string(&mut rng, 10),
        rng.random_range(10..100)
    )
}

/// Human-looking display name.
pub fn display_name() -> String {
    format!("{} {}", pick(FIRST_NAMES), alphanumeric(4))
}

/// Product-style name, e.g. "copper kettle 3f7a".
pub fn product_name() -> String {
    format!("{} {} {}", pick(ADJECTIVES), pick(NOUNS), alphanumeric(4))
}

/// Short free-text paragraph for questions and comment bodies.
pub fn paragraph() -> String {
    let mut rng = rand::rng();
    let sentences = rng.random_range(2..=4);
    let mut out = String::new();
    for i in 0..sentences {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!(
            "The {} {} arrived {} days ago.",
            pick(ADJECTIVES),
            pick(NOUNS),
            rng.random_range(1..30)
        ));
    }
    out
}

/// Uppercase coupon code, e.g. "SAVE-X9K2QF".
pub fn coupon_code() -> String {
    format!("SAVE-{}", alphanumeric(6).to_ascii_uppercase())
}

fn pick(options: &[&'static str]) -> &'static str {
    let mut rng = rand::rng();
    options[rng.random_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_well_formed_and_distinct() {
        let a = email("mall-e2e.test");
        let b = email("mall-e2e.test");
        assert!(a.ends_with("@mall-e2e.test"));
        assert_eq!(a.matches('@').count(), 1);
        assert_ne!(a, b);
    }

    #[test]
    fn passwords_mix_character_classes() {
        let pw = password();
        assert!(pw.len() >= 12);
        assert!(pw.contains('!'));
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn coupon_codes_are_uppercase() {
        let code = coupon_code();
        assert!(code.starts_with("SAVE-"));
        assert_eq!(code, code.to_ascii_uppercase());
    }

    #[test]
    fn paragraphs_are_nonempty() {
        assert!(!paragraph().is_empty());
    }
}
