use crate::problem::Parameter;

/// Render the formal parameter list, e.g. `int[] numbers, int target`.
///
/// Order follows the problem definition exactly; an empty slice renders as
/// the empty string.
pub fn method_parameters(parameters: &[Parameter]) -> String {
    parameters
        .iter()
        .map(|p| format!("{} {}", p.java_type, p.name))
        .collect::<Vec<_>>()
        .join(", ")
}
