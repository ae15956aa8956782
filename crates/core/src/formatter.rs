//! Renders labels and strengths as `(label:value)` lists.

use crate::policy::StrengthPolicy;
use crate::resolver::StrengthMap;

/// Render `labels` in order, looking each up in `strengths`.
///
/// Missing labels take the policy default; every value is clamped before
/// printing. An empty label list renders as an empty string.
pub fn format_strengths(
    labels: &[String],
    strengths: &StrengthMap,
    policy: &StrengthPolicy,
) -> String {
    labels
        .iter()
        .map(|label| {
            let value = strengths.get(label).copied().unwrap_or(policy.default);
            format_pair(label, value, policy)
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a single `(label:value)` pair.
pub fn format_pair(label: &str, value: f64, policy: &StrengthPolicy) -> String {
    format!("({label}:{})", policy.format(value))
}
