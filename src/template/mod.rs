use std::collections::{HashMap, HashSet};

use regex_lite::Regex;

/// Placeholder syntax: double braces around a single \w+ identifier,
/// optional whitespace inside the braces. Anything else ({{ }}, stray
/// braces, unclosed pairs) is not a placeholder and passes through as
/// literal text.
const PLACEHOLDER_PATTERN: &str = r"\{\{\s*(\w+)\s*\}\}";

fn placeholder_regex() -> Regex {
    // The pattern is a checked constant; compilation cannot fail.
    Regex::new(PLACEHOLDER_PATTERN).unwrap()
}

/// Result of a substitution pass over a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceResult {
    /// Template with every resolvable placeholder replaced.
    pub output: String,
    /// Names that could not be resolved, first-encounter order, deduplicated.
    pub undefined_vars: Vec<String>,
}

/// Extract all distinct variable names from a template.
/// Names are case-sensitive and returned in order of first appearance.
pub fn extract_variables(template: &str) -> Vec<String> {
    let re = placeholder_regex();
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    for caps in re.captures_iter(template) {
        let name = &caps[1];
        if seen.insert(name.to_string()) {
            found.push(name.to_string());
        }
    }

    found
}

/// Replace placeholders in a template with values from the map.
///
/// A placeholder is resolved only when its name maps to a non-empty value;
/// an empty-string value counts as undefined so a half-filled form never
/// silently blanks out configuration lines. Unresolved placeholders are
/// kept verbatim (original whitespace included) and their names reported.
pub fn replace_variables(template: &str, values: &HashMap<String, String>) -> ReplaceResult {
    let re = placeholder_regex();
    let mut output = String::with_capacity(template.len());
    let mut undefined_vars: Vec<String> = Vec::new();
    let mut last_end = 0;

    for caps in re.captures_iter(template) {
        let m = caps.get(0).unwrap();
        let name = &caps[1];
        output.push_str(&template[last_end..m.start()]);

        match values.get(name) {
            Some(value) if !value.is_empty() => output.push_str(value),
            _ => {
                output.push_str(m.as_str());
                if !undefined_vars.iter().any(|v| v == name) {
                    undefined_vars.push(name.to_string());
                }
            }
        }

        last_end = m.end();
    }
    output.push_str(&template[last_end..]);

    ReplaceResult {
        output,
        undefined_vars,
    }
}

/// Insert one blank line after every `interval` lines of text.
///
/// `interval <= 0` (and empty text) is a no-op. No blank line is appended
/// after the final line regardless of divisibility. Not idempotent: always
/// re-space the raw substitution output, never already-spaced text.
pub fn apply_line_spacing(text: &str, interval: i32) -> String {
    if interval <= 0 || text.is_empty() {
        return text.to_string();
    }

    let interval = interval as usize;
    let lines: Vec<&str> = text.split('\n').collect();
    let mut result: Vec<&str> = Vec::with_capacity(lines.len() + lines.len() / interval);

    for (i, line) in lines.iter().enumerate() {
        result.push(line);
        if (i + 1) % interval == 0 && i < lines.len() - 1 {
            result.push("");
        }
    }

    result.join("\n")
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
    fn test_extract_empty_and_plain_text() {
        assert!(extract_variables("").is_empty());
        assert!(extract_variables("no vars here").is_empty());
    }

    #[test]
    fn test_extract_dedupes_in_first_occurrence_order() {
        let vars = extract_variables("hostname {{ host }} and {{ host }} again");
        assert_eq!(vars, vec!["host"]);

        let vars = extract_variables("{{ b }} {{ a }} {{ b }} {{ c }} {{ a }}");
        assert_eq!(vars, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_extract_is_case_sensitive() {
        let vars = extract_variables("{{ Hostname }} {{ hostname }}");
        assert_eq!(vars, vec!["Hostname", "hostname"]);
    }

    #[test]
    fn test_extract_whitespace_variants() {
        let vars = extract_variables("{{host}} {{  ip  }} {{\tmask\n}}");
        assert_eq!(vars, vec!["host", "ip", "mask"]);
    }

    #[test]
    fn test_extract_ignores_malformed_placeholders() {
        assert!(extract_variables("{{ }}").is_empty());
        assert!(extract_variables("{ host }").is_empty());
        assert!(extract_variables("{{ two words }}").is_empty());
        assert!(extract_variables("{{ unclosed").is_empty());
    }

    #[test]
    fn test_extract_nested_braces_match_inner_pair() {
        assert_eq!(extract_variables("{{{{ x }}}}"), vec!["x"]);
    }

    #[test]
    fn test_replace_resolves_non_empty_values() {
        let result = replace_variables("ip {{ addr }}", &values(&[("addr", "10.0.0.1")]));
        assert_eq!(result.output, "ip 10.0.0.1");
        assert!(result.undefined_vars.is_empty());
    }

    #[test]
    fn test_replace_empty_value_counts_as_undefined() {
        let result = replace_variables("ip {{ addr }}", &values(&[("addr", "")]));
        assert_eq!(result.output, "ip {{ addr }}");
        assert_eq!(result.undefined_vars, vec!["addr"]);
    }

    #[test]
    fn test_replace_missing_value_keeps_placeholder() {
        let result = replace_variables("ip {{ addr }}", &HashMap::new());
        assert_eq!(result.output, "ip {{ addr }}");
        assert_eq!(result.undefined_vars, vec!["addr"]);
    }

    #[test]
    fn test_replace_preserves_original_placeholder_whitespace() {
        let result = replace_variables("a {{x}} b {{  x  }}", &HashMap::new());
        assert_eq!(result.output, "a {{x}} b {{  x  }}");
        assert_eq!(result.undefined_vars, vec!["x"]);
    }

    #[test]
    fn test_replace_reports_each_missing_name_once() {
        let result = replace_variables(
            "{{ a }} {{ b }} {{ a }} {{ c }}",
            &values(&[("b", "set")]),
        );
        assert_eq!(result.output, "{{ a }} set {{ a }} {{ c }}");
        assert_eq!(result.undefined_vars, vec!["a", "c"]);
    }

    #[test]
    fn test_replace_undefined_is_subset_of_extracted() {
        let template = "{{ one }} {{ two }} {{ three }} {{ one }}";
        let extracted = extract_variables(template);
        let result = replace_variables(template, &values(&[("two", "2"), ("three", "")]));
        for name in &result.undefined_vars {
            assert!(extracted.contains(name));
        }
        assert_eq!(result.undefined_vars, vec!["one", "three"]);
    }

    #[test]
    fn test_replace_extra_map_entries_are_ignored() {
        let result = replace_variables("static text", &values(&[("unused", "value")]));
        assert_eq!(result.output, "static text");
        assert!(result.undefined_vars.is_empty());
    }

    #[test]
    fn test_spacing_inserts_blank_lines_at_interval() {
        assert_eq!(apply_line_spacing("a\nb\nc\nd\ne", 2), "a\nb\n\nc\nd\n\ne");
    }

    #[test]
    fn test_spacing_no_trailing_blank_on_exact_multiple() {
        assert_eq!(apply_line_spacing("a\nb\nc\nd", 2), "a\nb\n\nc\nd");
    }

    #[test]
    fn test_spacing_every_line() {
        assert_eq!(apply_line_spacing("a\nb\nc", 1), "a\n\nb\n\nc");
    }

    #[test]
    fn test_spacing_non_positive_interval_is_identity() {
        let text = "a\nb\nc";
        assert_eq!(apply_line_spacing(text, 0), text);
        assert_eq!(apply_line_spacing(text, -3), text);
        assert_eq!(apply_line_spacing("", 5), "");
    }

    #[test]
    fn test_spacing_interval_beyond_line_count() {
        assert_eq!(apply_line_spacing("a\nb", 10), "a\nb");
    }

    #[test]
    fn test_spacing_trailing_newline_is_an_extra_empty_line() {
        // "a\nb\n" splits into ["a", "b", ""]; the blank goes after line 2.
        assert_eq!(apply_line_spacing("a\nb\n", 2), "a\nb\n\n");
    }

    #[test]
    fn test_spacing_blank_line_count_invariant() {
        let text = (1..=7).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        for interval in 1..=7 {
            let spaced = apply_line_spacing(&text, interval);
            let inserted = spaced.split('\n').filter(|l| l.is_empty()).count();
            assert_eq!(inserted, (7 - 1) / interval as usize);
        }
    }

    #[test]
    fn test_generate_pipeline_end_to_end() {
        let template = "hostname {{ host }}\ninterface Gi0/0\n ip address {{ ip }} {{ mask }}";
        let vals = values(&[("host", "r1"), ("ip", "10.0.0.1")]);

        let result = replace_variables(template, &vals);
        assert_eq!(result.undefined_vars, vec!["mask"]);
        assert_eq!(
            result.output,
            "hostname r1\ninterface Gi0/0\n ip address 10.0.0.1 {{ mask }}"
        );

        let spaced = apply_line_spacing(&result.output, 1);
        assert_eq!(
            spaced,
            "hostname r1\n\ninterface Gi0/0\n\n ip address 10.0.0.1 {{ mask }}"
        );
    }
}
