//! # Field Transforms and Shape Checks
//!
//! Transforms run only on fields that passed every rule. They are exposed
//! publicly so coordinators can preview normalization without a full
//! validation pass.

use serde_json::Value;

/// Capitalize the first character of every whitespace-delimited word.
///
/// Only the first character's case is touched: `"JOHN"` stays `"JOHN"` and
/// `"mcDonald"` becomes `"McDonald"`. Words are rejoined with single spaces,
/// so leading, trailing and repeated whitespace disappear.
pub fn transform_name(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        // `to_uppercase` may expand (`ß` -> `SS`); the rest is copied as-is.
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the whole address.
pub fn transform_email(email: &str) -> String {
    email.to_lowercase()
}

/// Check `local@domain.tld` shape.
///
/// Local part: `[A-Za-z0-9_'+.-]`, not starting or ending with `.`, no `..`,
/// and not ending with `'`. Domain: two or more dot-separated labels, each
/// starting with an ASCII alphanumeric and made of alphanumerics and `-`;
/// the last label is at least two ASCII letters.
pub fn is_email_shape(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    is_local_part(local) && is_domain(domain)
}

fn is_local_part(local: &str) -> bool {
    let bytes = local.as_bytes();
    let (Some(&first), Some(&last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    if first == b'.' || last == b'.' || last == b'\'' || local.contains("..") {
        return false;
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'\'' | b'+' | b'.' | b'-'))
}

fn is_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    let hosts_ok = hosts.iter().all(|label| {
        let bytes = label.as_bytes();
        bytes.first().is_some_and(u8::is_ascii_alphanumeric)
            && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
    });
    hosts_ok && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Coerce a raw knowledge value to a number.
///
/// Follows form-number semantics: numbers pass through; strings are trimmed
/// and parsed, with the empty string becoming `0`; a missing or `null` value
/// is `0`. Booleans, lists, objects and unparsable text are rejected.
/// Non-finite results (`"inf"`, `"NaN"`) are returned as-is for the rule
/// chain to reject.
pub fn coerce_knowledge(raw: Option<&Value>) -> Option<f64> {
    match raw {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(_) | Value::Array(_) | Value::Object(_)) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_single_word() {
        assert_eq!(transform_name("ana"), "Ana");
        assert_eq!(transform_name("a"), "A");
    }

    #[test]
    fn test_name_only_first_char_touched() {
        assert_eq!(transform_name("JOHN"), "JOHN");
        assert_eq!(transform_name("maria silva"), "Maria Silva");
        assert_eq!(transform_name("mcDonald o'neil"), "McDonald O'neil");
    }

    #[test]
    fn test_name_collapses_whitespace() {
        assert_eq!(transform_name("  maria   da\tsilva  "), "Maria Da Silva");
    }

    #[test]
    fn test_name_multibyte_first_char() {
        assert_eq!(transform_name("élodie"), "Élodie");
        assert_eq!(transform_name("ßtraße"), "SStraße");
    }

    #[test]
    fn test_email_lowercase() {
        assert_eq!(transform_email("M@X.COM"), "m@x.com");
        assert_eq!(transform_email("ana@x.com"), "ana@x.com");
    }

    #[test]
    fn test_email_shape_accepts() {
        for ok in [
            "ana@x.com",
            "M@X.COM",
            "first.last@example.co.uk",
            "o'neil+tag@mail-host.io",
            "a_b-c@sub.domain.org",
        ] {
            assert!(is_email_shape(ok), "rejected {ok:?}");
        }
    }

    #[test]
    fn test_email_shape_rejects() {
        for bad in [
            "",
            "plain",
            "@x.com",
            "ana@",
            "ana@x",
            "ana@x.c",
            "ana@x.c0m",
            ".ana@x.com",
            "ana.@x.com",
            "an..a@x.com",
            "ana'@x.com",
            "ana@-x.com",
            "ana@x..com",
            "ana@@x.com",
            "ana b@x.com",
            "ana@x.com.",
        ] {
            assert!(!is_email_shape(bad), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_coerce_knowledge() {
        assert_eq!(coerce_knowledge(Some(&json!("80"))), Some(80.0));
        assert_eq!(coerce_knowledge(Some(&json!(" 42.5 "))), Some(42.5));
        assert_eq!(coerce_knowledge(Some(&json!(70))), Some(70.0));
        assert_eq!(coerce_knowledge(Some(&json!(""))), Some(0.0));
        assert_eq!(coerce_knowledge(Some(&Value::Null)), Some(0.0));
        assert_eq!(coerce_knowledge(None), Some(0.0));
        assert_eq!(coerce_knowledge(Some(&json!("eighty"))), None);
        assert_eq!(coerce_knowledge(Some(&json!(true))), None);
        assert_eq!(coerce_knowledge(Some(&json!([80]))), None);
    }
}
