//! Merge-tag substitution.
//!
//! `{{first_name}}` placeholders are replaced from a sample-data map,
//! layered on top of rendered output (or individual text props) by the
//! preview and delivery collaborators. Unknown tags are left intact so
//! missing sample data stays visible in previews.

use std::collections::HashMap;

/// Replace `{{key}}` occurrences with values from `values`.
pub fn substitute(input: &str, values: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(&after[..end]);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                // Unterminated tag: emit verbatim
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replaces_known_tags() {
        let out = substitute(
            "Hi {{first_name}}, welcome to {{company}}!",
            &values(&[("first_name", "Ada"), ("company", "Mailsmith")]),
        );
        assert_eq!(out, "Hi Ada, welcome to Mailsmith!");
    }

    #[test]
    fn test_unknown_tags_left_intact() {
        let out = substitute("Hi {{first_name}}!", &values(&[]));
        assert_eq!(out, "Hi {{first_name}}!");
    }

    #[test]
    fn test_whitespace_inside_tag_is_trimmed() {
        let out = substitute("Hi {{ first_name }}!", &values(&[("first_name", "Ada")]));
        assert_eq!(out, "Hi Ada!");
    }

    #[test]
    fn test_unterminated_tag_passes_through() {
        let out = substitute("broken {{tag", &values(&[("tag", "x")]));
        assert_eq!(out, "broken {{tag");
    }
}
