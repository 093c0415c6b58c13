use std::fmt::{self, Write};

use super::parameters::method_parameters;
use crate::problem::{Function, Problem};

const IMPORTS: &str = "import java.util.*;\nimport com.jalgoarena.type.*;\n";
const CLASS_OPEN: &str = "public class Solution {\n";
const DOC_OPEN: &str = "    /**\n";
const DOC_LINE: &str = "     *";
const DOC_CLOSE: &str = "     */\n";
const BODY_PLACEHOLDER: &str = "        // Write your code here\n";
const CLOSING: &str = "    }\n}";

/// Reasons a skeleton cannot be produced from a problem definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The function has no name, so there is no method to declare
    EmptyFunctionName,
    /// A parameter has no name (zero-based position in the parameter list)
    UnnamedParameter {
        /// Position of the offending parameter
        index: usize,
    },
    /// Writing into the output buffer failed
    Format,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::EmptyFunctionName => write!(f, "function name is empty"),
            RenderError::UnnamedParameter { index } => {
                write!(f, "parameter #{index} has an empty name")
            }
            RenderError::Format => write!(f, "failed to write skeleton source"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<fmt::Error> for RenderError {
    fn from(_: fmt::Error) -> Self {
        RenderError::Format
    }
}

/// Render the Java skeleton for a problem.
pub fn render_problem(problem: &Problem) -> Result<String, RenderError> {
    render_skeleton(&problem.function)
}

/// Render the Java skeleton for a function definition
///
/// Produces the two fixed imports, the `Solution` class, a Javadoc block with
/// one `@param` line per parameter followed by the `@return` line, and the
/// method declaration with an empty body. The output has no trailing newline
/// and is byte-identical for identical input.
///
/// Names and comments are emitted as-is; nothing is escaped.
///
/// # Errors
///
/// Returns [`RenderError`] if the function or one of its parameters has an
/// empty name. No partial output is produced in that case.
///
/// # Example
///
/// ```rust
/// use skeleton_java::generator::render_skeleton;
/// use skeleton_java::problem::{Function, Parameter, ReturnStatement};
///
/// let function = Function {
///     name: "fib".to_string(),
///     parameters: vec![Parameter::new("n", "java.lang.Integer", "", "term index")],
///     returns: ReturnStatement::new("java.lang.Long", "", "the term"),
/// };
/// let source = render_skeleton(&function).unwrap();
/// assert!(source.contains("    public long fib(int n) {\n"));
/// ```
pub fn render_skeleton(function: &Function) -> Result<String, RenderError> {
    validate(function)?;

    let mut out = String::with_capacity(256);
    out.push_str(IMPORTS);
    out.push('\n');
    out.push_str(CLASS_OPEN);

    out.push_str(DOC_OPEN);
    for parameter in &function.parameters {
        doc_line(&mut out, &format!("@param {}", parameter.name), &parameter.comment)?;
    }
    doc_line(&mut out, "@return", &function.returns.comment)?;
    out.push_str(DOC_CLOSE);

    writeln!(
        out,
        "    public {} {}({}) {{",
        function.returns.java_type,
        function.name,
        method_parameters(&function.parameters)
    )?;
    out.push_str(BODY_PLACEHOLDER);
    out.push_str(CLOSING);

    Ok(out)
}

fn validate(function: &Function) -> Result<(), RenderError> {
    if function.name.is_empty() {
        return Err(RenderError::EmptyFunctionName);
    }
    if let Some(index) = function.parameters.iter().position(|p| p.name.is_empty()) {
        return Err(RenderError::UnnamedParameter { index });
    }
    Ok(())
}

/// One Javadoc line; an empty comment leaves no trailing space.
fn doc_line(out: &mut String, tag: &str, comment: &str) -> fmt::Result {
    if comment.is_empty() {
        writeln!(out, "{DOC_LINE} {tag}")
    } else {
        writeln!(out, "{DOC_LINE} {tag} {comment}")
    }
}
