use std::fmt;

/// Reserved JVM descriptor tokens and the Java array syntax they stand for.
const ARRAY_TOKENS: [(&str, JavaType); 4] = [
    ("[I", JavaType::IntArray),
    ("[D", JavaType::DoubleArray),
    ("[[I", JavaType::IntMatrix),
    ("[[C", JavaType::CharMatrix),
];

/// Boxed wrapper types that are rendered as their native primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `java.lang.Boolean`
    Boolean,
    /// `java.lang.Long`
    Long,
    /// `java.lang.Integer`
    Integer,
    /// `java.lang.Double`
    Double,
}

impl Primitive {
    /// Resolve a simple (unqualified) wrapper name such as `Long`.
    pub fn from_wrapper(simple_name: &str) -> Option<Self> {
        match simple_name {
            "Boolean" => Some(Primitive::Boolean),
            "Long" => Some(Primitive::Long),
            "Integer" => Some(Primitive::Integer),
            "Double" => Some(Primitive::Double),
            _ => None,
        }
    }

    /// Keyword emitted in the generated declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "bool",
            Primitive::Long => "long",
            Primitive::Integer => "int",
            Primitive::Double => "double",
        }
    }
}

/// A type as it appears in a generated Java declaration
///
/// Built once from the raw `type`/`generic` strings of the problem store and
/// rendered by exhaustive match. Construction never fails: anything that is
/// not a known token or wrapper becomes a [`JavaType::Reference`] and is
/// emitted verbatim.
///
/// # Example
///
/// ```rust
/// use skeleton_java::generator::JavaType;
///
/// let ty = JavaType::from_descriptor("java.util.ArrayList", "Interval");
/// assert_eq!(ty.to_string(), "ArrayList<Interval>");
/// assert_eq!(JavaType::from_descriptor("[I", "").to_string(), "int[]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    /// `void`, only meaningful as a return type
    Void,
    /// `int[]`
    IntArray,
    /// `double[]`
    DoubleArray,
    /// `int[][]`
    IntMatrix,
    /// `char[][]`
    CharMatrix,
    /// A boxed wrapper mapped back to its primitive
    Primitive(Primitive),
    /// Any other type, by simple name, with an optional type argument
    Reference {
        /// Simple name with the package qualification stripped
        name: String,
        /// Type argument, `None` when the descriptor had an empty generic
        generic: Option<String>,
    },
}

impl JavaType {
    /// Classify a raw type descriptor.
    ///
    /// Array tokens are matched exactly before anything else and ignore
    /// `generic`. `void` maps to [`JavaType::Void`]. Everything else is
    /// reduced to its simple name, checked against the wrapper aliases and
    /// otherwise kept as a reference type carrying `generic` when non-empty.
    pub fn from_descriptor(ty: &str, generic: &str) -> Self {
        if let Some((_, array)) = ARRAY_TOKENS.iter().find(|(token, _)| *token == ty) {
            return array.clone();
        }
        if ty == "void" {
            return JavaType::Void;
        }

        let name = simple_name(ty);
        if let Some(primitive) = Primitive::from_wrapper(name) {
            return JavaType::Primitive(primitive);
        }

        JavaType::Reference {
            name: name.to_string(),
            generic: (!generic.is_empty()).then(|| generic.to_string()),
        }
    }

    /// Classify the descriptor of a return statement, where an empty type
    /// means the method returns nothing.
    pub fn from_return_descriptor(ty: &str, generic: &str) -> Self {
        if ty.is_empty() {
            JavaType::Void
        } else {
            Self::from_descriptor(ty, generic)
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Void => f.write_str("void"),
            JavaType::IntArray => f.write_str("int[]"),
            JavaType::DoubleArray => f.write_str("double[]"),
            JavaType::IntMatrix => f.write_str("int[][]"),
            JavaType::CharMatrix => f.write_str("char[][]"),
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Reference {
                name,
                generic: Some(arg),
            } => write!(f, "{name}<{arg}>"),
            JavaType::Reference {
                name,
                generic: None,
            } => f.write_str(name),
        }
    }
}

/// Strip the package qualification, keeping what follows the last `.`.
pub fn simple_name(qualified: &str) -> &str {
    qualified
        .rsplit_once('.')
        .map_or(qualified, |(_, simple)| simple)
}

/// Map a raw `type`/`generic` pair straight to its Java declaration.
///
/// Total over all inputs; see [`JavaType::from_descriptor`].
pub fn map_type(ty: &str, generic: &str) -> String {
    JavaType::from_descriptor(ty, generic).to_string()
}
