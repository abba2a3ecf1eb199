use regex::Regex;
use std::sync::LazyLock;

static REPLACEMENTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bquantum\b", "Quantum ⚛️"),
        (r"(?i)\bentanglement\b", "entanglement 🔗"),
        (r"(?i)\bsuperposition\b", "superposition ⚡"),
        (r"(?i)\bqubit\b", "qubit 🎯"),
        (r"(?i)\bcircuit\b", "circuit 🔌"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| match Regex::new(pattern) {
        Ok(re) => Some((re, replacement)),
        Err(e) => {
            tracing::error!("Invalid decoration pattern {}: {}", pattern, e);
            None
        }
    })
    .collect()
});

/// Decorates key quantum terms with an emoji marker.
pub fn format_response(text: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(text.to_string(), |acc, (re, replacement)| {
            re.replace_all(&acc, *replacement).into_owned()
        })
}
