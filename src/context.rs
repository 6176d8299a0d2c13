//! Symbol table for expression resolution.
//!
//! The symbol table holds the name of the free variable, named constants and named
//! unary functions. It is consulted by the normalizer (to split run-together names
//! such as `xsin`) and by the resolver (to bind identifiers). It is never touched
//! during evaluation, so one table can be shared by any number of threads.

use crate::Real;
use crate::functions::BUILTINS;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Implementation of a unary function callable from expressions.
pub type NativeFn = Arc<dyn Fn(Real) -> Real + Send + Sync>;

/// A named unary function registered in a [`SymbolTable`].
#[derive(Clone)]
pub struct NativeFunction {
    /// The name of the function as it is written in expressions.
    pub name: String,

    /// The actual implementation of the function as a Rust closure.
    pub implementation: NativeFn,
}

impl NativeFunction {
    pub fn call(&self, arg: Real) -> Real {
        (self.implementation)(arg)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Names available to an expression: the free variable, constants and functions.
///
/// # Examples
///
/// ```
/// use graph_eval::{Expression, SymbolTable};
///
/// let mut symbols = SymbolTable::new().with_variable("t");
/// symbols.register_constant("k", 2.0);
/// symbols.register_function("double", |v| 2.0 * v);
///
/// let expr = Expression::parse_with("double(k t)", &symbols).unwrap();
/// assert_eq!(expr.eval(3.0).unwrap(), 12.0);
/// ```
#[derive(Clone)]
pub struct SymbolTable {
    variable: String,
    constants: BTreeMap<String, Real>,
    functions: BTreeMap<String, NativeFunction>,
}

impl SymbolTable {
    /// Creates a table with the free variable `x` and all built-in constants and functions.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register_default_constants();
        table.register_default_math_functions();
        table
    }

    /// Creates a table with the free variable `x` and nothing else.
    pub fn empty() -> Self {
        Self {
            variable: "x".to_string(),
            constants: BTreeMap::new(),
            functions: BTreeMap::new(),
        }
    }

    /// Replaces the name of the free variable.
    pub fn with_variable(mut self, name: &str) -> Self {
        self.variable = name.to_string();
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn register_default_constants(&mut self) {
        self.register_constant("pi", crate::constants::PI);
        self.register_constant("e", crate::constants::E);
        self.register_constant("tau", crate::constants::TAU);
    }

    pub fn register_default_math_functions(&mut self) {
        for (name, implementation) in BUILTINS {
            self.register_function(name, *implementation);
        }
    }

    /// Registers a named constant, replacing any previous value.
    pub fn register_constant(&mut self, name: &str, value: Real) -> Option<Real> {
        self.constants.insert(name.to_string(), value)
    }

    /// Registers a named unary function, replacing any previous one with the same name.
    ///
    /// The function should return NaN or infinity outside its domain; evaluation
    /// reports such results as [`crate::EvaluationError::NonFinite`].
    pub fn register_function<F>(&mut self, name: &str, implementation: F)
    where
        F: Fn(Real) -> Real + Send + Sync + 'static,
    {
        let function = NativeFunction {
            name: name.to_string(),
            implementation: Arc::new(implementation),
        };
        self.functions.insert(name.to_string(), function);
    }

    pub fn constant(&self, name: &str) -> Option<Real> {
        self.constants.get(name).copied()
    }

    pub fn function(&self, name: &str) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// True for the free variable, any constant and any function name.
    pub fn is_known(&self, name: &str) -> bool {
        name == self.variable || self.constants.contains_key(name) || self.is_function(name)
    }

    /// The longest known name that `ident` starts with.
    ///
    /// Used to split run-together identifiers such as `pix` into `pi`, `x`.
    pub fn longest_prefix<'s>(&self, ident: &'s str) -> Option<&'s str> {
        (1..=ident.len())
            .rev()
            .filter(|&end| ident.is_char_boundary(end))
            .map(|end| &ident[..end])
            .find(|prefix| self.is_known(prefix))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolTable")
            .field("variable", &self.variable)
            .field("constants", &self.constants)
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_default_table_has_builtins() {
        let table = SymbolTable::new();
        assert_eq!(table.variable(), "x");
        assert_approx_eq!(table.constant("pi").unwrap(), crate::constants::PI);
        assert!(table.constant("e").is_some());
        for name in ["sin", "cos", "tan", "sqrt", "ln", "log", "exp", "abs", "floor"] {
            assert!(table.is_function(name), "missing builtin {}", name);
        }
        assert!(!table.is_function("pi"));
    }

    #[test]
    fn test_empty_table() {
        let table = SymbolTable::empty();
        assert!(table.is_known("x"));
        assert!(!table.is_known("sin"));
        assert!(table.constant("pi").is_none());
    }

    #[test]
    fn test_register_and_override() {
        let mut table = SymbolTable::new();
        table.register_function("sin", |_| 42.0);
        assert_eq!(table.function("sin").unwrap().call(0.0), 42.0);
        assert_eq!(table.register_constant("g", 9.81), None);
        assert_eq!(table.register_constant("g", 9.8), Some(9.81));
    }

    #[test]
    fn test_longest_prefix_prefers_longer_names() {
        let table = SymbolTable::new();
        assert_eq!(table.longest_prefix("pix"), Some("pi"));
        assert_eq!(table.longest_prefix("xsin"), Some("x"));
        assert_eq!(table.longest_prefix("log10x"), Some("log10"));
        assert_eq!(table.longest_prefix("expx"), Some("exp"));
        assert_eq!(table.longest_prefix("qq"), None);
    }

    #[test]
    fn test_custom_variable_name() {
        let table = SymbolTable::new().with_variable("t");
        assert!(table.is_known("t"));
        assert!(!table.is_known("x"));
    }

    #[test]
    fn test_table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SymbolTable>();
    }
}
