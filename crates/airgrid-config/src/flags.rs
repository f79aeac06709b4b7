//! Feature-flag payload parsing.
//!
//! One payload string, three accepted shapes, all normalizing to an
//! ordered name → value map:
//!
//! - JSON object: `{"use_mocks": true, "lab": "blue"}`
//! - JSON array:  `["use_mocks", "new_dashboard"]` (listed names are true)
//! - CSV / list:  `use_mocks=true,lab=blue` or `use_mocks&new_dashboard`
//!   (`;` and `&` are accepted separators; a bare name means true)
//!
//! String values that spell a boolean (`true/1/yes/on`, `false/0/no/off`)
//! coerce to booleans; anything else stays a string.

use indexmap::IndexMap;

/// A parsed flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

pub type FlagMap = IndexMap<String, FlagValue>;

fn coerce(raw: &str) -> FlagValue {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => FlagValue::Bool(true),
        "false" | "0" | "no" | "off" => FlagValue::Bool(false),
        _ => FlagValue::Text(raw.trim().to_owned()),
    }
}

fn parse_json_style(payload: &str) -> Option<FlagMap> {
    let trimmed = payload.trim();
    // Only attempt JSON when it looks like JSON.
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }

    let parsed: serde_json::Value = serde_json::from_str(trimmed).ok()?;
    let mut out = FlagMap::new();

    match parsed {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                let flag = match value {
                    serde_json::Value::Bool(b) => FlagValue::Bool(b),
                    serde_json::Value::String(s) => coerce(&s),
                    serde_json::Value::Number(n) => FlagValue::Text(n.to_string()),
                    _ => continue,
                };
                out.insert(key, flag);
            }
            Some(out)
        }
        serde_json::Value::Array(items) => {
            for item in items {
                if let serde_json::Value::String(name) = item {
                    let name = name.trim();
                    if !name.is_empty() {
                        out.insert(name.to_owned(), FlagValue::Bool(true));
                    }
                }
            }
            Some(out)
        }
        _ => Some(out),
    }
}

fn parse_list_style(payload: &str) -> FlagMap {
    let mut out = FlagMap::new();
    let cleaned = payload.trim().replace([';', '&'], ",");

    for part in cleaned.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('=') {
            Some((key, value)) => {
                let key = key.trim();
                if !key.is_empty() {
                    out.insert(key.to_owned(), coerce(value));
                }
            }
            // flag-only form implies true
            None => {
                out.insert(part.to_owned(), FlagValue::Bool(true));
            }
        }
    }

    out
}

/// Parse a flag payload in any of the accepted shapes.
pub fn parse_flags(payload: &str) -> FlagMap {
    parse_json_style(payload).unwrap_or_else(|| parse_list_style(payload))
}

/// Whether a flag is enabled, with a default for missing flags.
/// A non-boolean string counts as enabled when non-empty.
pub fn flag_enabled(flags: &FlagMap, name: &str, default: bool) -> bool {
    match flags.get(name) {
        Some(FlagValue::Bool(b)) => *b,
        Some(FlagValue::Text(s)) => !s.is_empty(),
        None => default,
    }
}

/// The raw string value of a flag, if present.
pub fn flag_value<'a>(flags: &'a FlagMap, name: &str) -> Option<&'a FlagValue> {
    flags.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_object_form() {
        let flags = parse_flags(r#"{"use_mocks": true, "lab": "blue", "beta": "yes"}"#);
        assert_eq!(flags.get("use_mocks"), Some(&FlagValue::Bool(true)));
        assert_eq!(flags.get("lab"), Some(&FlagValue::Text("blue".into())));
        assert_eq!(flags.get("beta"), Some(&FlagValue::Bool(true)));
    }

    #[test]
    fn json_array_form_marks_names_true() {
        let flags = parse_flags(r#"["use_mocks", "new_dashboard"]"#);
        assert!(flag_enabled(&flags, "use_mocks", false));
        assert!(flag_enabled(&flags, "new_dashboard", false));
        assert!(!flag_enabled(&flags, "other", false));
    }

    #[test]
    fn csv_with_pairs_and_bare_names() {
        let flags = parse_flags("use_mocks=true,lab=blue,new_dashboard");
        assert_eq!(flags.get("use_mocks"), Some(&FlagValue::Bool(true)));
        assert_eq!(flags.get("lab"), Some(&FlagValue::Text("blue".into())));
        assert_eq!(flags.get("new_dashboard"), Some(&FlagValue::Bool(true)));
    }

    #[test]
    fn ampersand_and_semicolon_separators() {
        let flags = parse_flags("a=1&b=off;c");
        assert_eq!(flags.get("a"), Some(&FlagValue::Bool(true)));
        assert_eq!(flags.get("b"), Some(&FlagValue::Bool(false)));
        assert_eq!(flags.get("c"), Some(&FlagValue::Bool(true)));
    }

    #[test]
    fn empty_payload_is_an_empty_map() {
        assert!(parse_flags("").is_empty());
        assert!(parse_flags("   ").is_empty());
    }

    #[test]
    fn malformed_json_falls_back_to_list_parsing() {
        // an unclosed brace is not valid JSON and not a useful list either
        let flags = parse_flags("{oops");
        assert_eq!(flags.len(), 1);
        assert!(flags.contains_key("{oops"));
    }

    #[test]
    fn declaration_order_is_preserved() {
        let flags = parse_flags("z,a,m");
        let keys: Vec<&String> = flags.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn defaults_apply_only_when_missing() {
        let flags = parse_flags("off_flag=false");
        assert!(!flag_enabled(&flags, "off_flag", true));
        assert!(flag_enabled(&flags, "missing", true));
    }
}
