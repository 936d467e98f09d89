//! Параметр `variant` в строке запроса
//!
//! Разбирается и заменяется только пара `variant=`. Остальные пары
//! (повторяющиеся ключи, `filter[color]=red`, свое кодирование) остаются как
//! написаны.

use serde::{Deserialize, Serialize};

pub const VARIANT_PARAM: &str = "variant";

#[derive(Debug, Serialize, Deserialize)]
struct VariantQuery {
    variant: Option<String>,
}

/// Пары запроса без ведущего `?`, пустые сегменты отброшены
fn pairs(search: &str) -> impl Iterator<Item = &str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
}

fn is_variant_pair(pair: &str) -> bool {
    pair.split_once('=').map_or(pair, |(key, _)| key) == VARIANT_PARAM
}

/// Значение `variant` из `search` (первое, если их несколько).
/// Пустое значение считается отсутствующим.
pub fn variant_param(search: &str) -> Option<String> {
    let pair = pairs(search).find(|pair| is_variant_pair(pair))?;
    serde_qs::from_str::<VariantQuery>(pair)
        .ok()
        .and_then(|query| query.variant)
        .filter(|value| !value.is_empty())
}

/// `search` с `variant=value` на месте первой такой пары (или в конце)
pub fn with_variant(search: &str, value: &str) -> Result<String, serde_qs::Error> {
    let encoded = serde_qs::to_string(&VariantQuery {
        variant: Some(value.to_string()),
    })?;

    let mut out: Vec<&str> = Vec::new();
    let mut replaced = false;
    for pair in pairs(search) {
        if !is_variant_pair(pair) {
            out.push(pair);
        } else if !replaced {
            out.push(encoded.as_str());
            replaced = true;
        }
    }
    if !replaced {
        out.push(encoded.as_str());
    }
    Ok(format!("?{}", out.join("&")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_param() {
        assert_eq!(
            variant_param("?variant=39617318551639").as_deref(),
            Some("39617318551639")
        );
        assert_eq!(variant_param("?a=1&variant=7").as_deref(), Some("7"));
        assert_eq!(variant_param("?variant=7&variant=8").as_deref(), Some("7"));
        assert_eq!(variant_param(""), None);
        assert_eq!(variant_param("?"), None);
        assert_eq!(variant_param("?variant="), None);
        assert_eq!(variant_param("?variants=7"), None);
    }

    #[test]
    fn test_variant_param_survives_other_params() {
        assert_eq!(
            variant_param("?variant=103&filter[color]=red").as_deref(),
            Some("103")
        );
        assert_eq!(
            variant_param("?utm=a&utm=b&variant=103").as_deref(),
            Some("103")
        );
        assert_eq!(
            variant_param("?q=a%20b&variant=103&x[]=1&x[]=2").as_deref(),
            Some("103")
        );
    }

    #[test]
    fn test_with_variant_appends() {
        assert_eq!(with_variant("", "5").unwrap(), "?variant=5");
        assert_eq!(with_variant("?", "5").unwrap(), "?variant=5");
        assert_eq!(with_variant("?ref=mail", "5").unwrap(), "?ref=mail&variant=5");
    }

    #[test]
    fn test_with_variant_replaces_in_place() {
        assert_eq!(
            with_variant("?variant=1&ref=mail", "2").unwrap(),
            "?variant=2&ref=mail"
        );
        assert_eq!(
            with_variant("?variant=103&filter[color]=red", "5").unwrap(),
            "?variant=5&filter[color]=red"
        );
        assert_eq!(
            with_variant("?utm=a&variant=103&utm=b", "5").unwrap(),
            "?utm=a&variant=5&utm=b"
        );
        assert_eq!(
            with_variant("?variant=103&q=a%20b", "5").unwrap(),
            "?variant=5&q=a%20b"
        );
        // повторный variant схлопывается в одну пару
        assert_eq!(
            with_variant("?variant=1&a=b&variant=2", "3").unwrap(),
            "?variant=3&a=b"
        );
    }
}
