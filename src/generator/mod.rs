//! # Generator Module
//!
//! Turns a [`Problem`](crate::problem::Problem) into a Java source skeleton.
//!
//! ## Layers
//!
//! - **[`java_type`]** - maps an abstract type descriptor (`java.lang.Long`, `[I`,
//!   `java.util.ArrayList` + `Interval`) to a Java declaration (`long`, `int[]`,
//!   `ArrayList<Interval>`). Total: unknown names are emitted verbatim.
//! - **[`parameters`]** - renders the comma-joined formal parameter list.
//! - **[`skeleton`]** - assembles imports, class, Javadoc and method stub.
//!
//! ## Output
//!
//! ```text
//! import java.util.*;
//! import com.jalgoarena.type.*;
//!
//! public class Solution {
//!     /**
//!      * @param n id of fibonacci term to be returned
//!      * @return N'th term of Fibonacci sequence
//!      */
//!     public long fib(int n) {
//!         // Write your code here
//!     }
//! }
//! ```
//!
//! All three layers are pure and synchronous; they work on immutable,
//! request-scoped problem data and need no locking.

pub mod java_type;
pub mod parameters;
pub mod skeleton;


pub use java_type::{map_type, simple_name, JavaType, Primitive};
pub use parameters::method_parameters;
pub use skeleton::{render_problem, render_skeleton, RenderError};
