//! Requirement specifier normalization.
//!
//! Registries publish dependencies as raw specifiers such as
//! `urllib3>=1.21.1,<2 ; extra == 'socks'`. This module reduces one specifier
//! to the bare package identifier it names.

/// Version comparison operators, in the order they are scanned
pub const VERSION_OPERATORS: [&str; 7] = ["==", "!=", "<=", ">=", "<", ">", "~="];

/// Identifier standing for the language runtime itself; callers discard it
pub const RUNTIME_SENTINEL: &str = "python";

/// Reduce a raw requirement specifier to a bare package identifier.
///
/// Returns `None` when nothing usable remains. Never panics on malformed
/// input; the worst case is the first whitespace-delimited token unchanged.
///
/// The runtime sentinel is not filtered here.
pub fn normalize_requirement(specifier: &str) -> Option<String> {
    if specifier.is_empty() {
        return None;
    }

    // Extras marker: `pandas[test]` -> `pandas`
    let without_extras = truncate_at(specifier, "[");

    // Environment marker clause
    let without_marker = truncate_at(without_extras, ";").trim();

    let token = without_marker.split_whitespace().next()?;

    let name = VERSION_OPERATORS
        .iter()
        .find(|op| token.contains(*op))
        .map_or(token, |op| truncate_at(token, op))
        .trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Prefix of `input` before the first occurrence of `pattern`
fn truncate_at<'a>(input: &'a str, pattern: &str) -> &'a str {
    input.split_once(pattern).map_or(input, |(prefix, _)| prefix)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn name_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_.-]{0,20}"
    }

    fn version_strategy() -> impl Strategy<Value = String> {
        "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}"
    }

    proptest! {
        #[test]
        fn extras_marker_never_survives(
            name in name_strategy(),
            extra in "[a-z,]{0,10}",
            suffix in "[ -~]{0,20}",
        ) {
            let input = format!("{}[{}]{}", name, extra, suffix);
            if let Some(output) = normalize_requirement(&input) {
                prop_assert!(!output.contains('['));
                prop_assert!(!output.contains(']'));
            }
        }

        #[test]
        fn marker_clause_never_survives(
            prefix in "[ -~]{0,20}",
            marker in "[ -~]{0,20}",
        ) {
            let input = format!("{};{}", prefix, marker);
            if let Some(output) = normalize_requirement(&input) {
                prop_assert!(!output.contains(';'));
            }
        }

        #[test]
        fn every_operator_is_stripped(
            name in name_strategy(),
            version in version_strategy(),
            op_index in 0usize..VERSION_OPERATORS.len(),
        ) {
            let input = format!("{}{}{}", name, VERSION_OPERATORS[op_index], version);
            prop_assert_eq!(normalize_requirement(&input), Some(name));
        }

        #[test]
        fn arbitrary_input_never_panics(input in "\\PC{0,40}") {
            let _ = normalize_requirement(&input);
        }
    }
}
