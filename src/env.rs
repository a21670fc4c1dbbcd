// ABOUTME: Environment module for lexical scope and the process-wide built-in table

use crate::builtins::{self, Builtin};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::OnceLock;

/// A user-defined callable: a name, a parameter-name list, and a body
/// (a List of forms evaluated in order on each call).
#[derive(Debug, Clone)]
pub struct UserFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Value,
}

fn builtin_table() -> &'static HashMap<&'static str, Builtin> {
    static TABLE: OnceLock<HashMap<&'static str, Builtin>> = OnceLock::new();
    TABLE.get_or_init(builtins::build_table)
}

/// One link in the lexical scope chain. Variables and user functions climb
/// to the parent when not found locally; the built-in table is consulted
/// directly and never climbed, since it is shared process-wide.
#[derive(Debug)]
pub struct Environment {
    variables: RefCell<HashMap<String, Value>>,
    user_functions: RefCell<HashMap<String, Rc<UserFunction>>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new root environment with no parent. Also triggers
    /// one-time initialisation of the process-wide built-in table.
    pub fn new() -> Rc<Self> {
        builtin_table();
        Rc::new(Environment {
            variables: RefCell::new(HashMap::new()),
            user_functions: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child frame whose parent is `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            variables: RefCell::new(HashMap::new()),
            user_functions: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Binds/overwrites a variable in THIS frame.
    pub fn set_variable(&self, name: String, value: Value) {
        self.variables.borrow_mut().insert(name, value);
    }

    /// Binds/overwrites a user function in THIS frame.
    pub fn set_user_function(&self, name: String, function: UserFunction) {
        self.user_functions
            .borrow_mut()
            .insert(name, Rc::new(function));
    }

    /// Looks up a variable in this frame, then the parent chain.
    pub fn try_get_variable(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|p| p.try_get_variable(name))
    }

    /// Looks up a user function in this frame, then the parent chain.
    pub fn try_get_user_function(&self, name: &str) -> Option<Rc<UserFunction>> {
        if let Some(f) = self.user_functions.borrow().get(name) {
            return Some(f.clone());
        }
        self.parent
            .as_ref()
            .and_then(|p| p.try_get_user_function(name))
    }

    /// Consults the shared, process-wide built-in table. Never climbs the
    /// parent chain — the table is the same for every environment.
    pub fn try_get_builtin(&self, name: &str) -> Option<Builtin> {
        builtin_table().get(name).copied()
    }

    /// Names of every built-in in the process-wide table, sorted.
    pub fn builtin_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = builtin_table().keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Names of user functions visible from this frame (this frame plus
    /// its ancestors), sorted and deduplicated.
    pub fn user_function_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.user_functions.borrow().keys().cloned().collect();
        if let Some(parent) = &self.parent {
            names.extend(parent.user_function_names());
        }
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Names of variables visible from this frame (this frame plus its
    /// ancestors), sorted and deduplicated.
    pub fn variable_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.variables.borrow().keys().cloned().collect();
        if let Some(parent) = &self.parent {
            names.extend(parent.variable_names());
        }
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_variable() {
        let env = Environment::new();
        env.set_variable("x".to_string(), Value::int(42));
        assert_eq!(env.try_get_variable("x").unwrap().as_int().unwrap(), 42);
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        assert!(env.try_get_variable("undefined").is_none());
    }

    #[test]
    fn test_shadowing() {
        let parent = Environment::new();
        parent.set_variable("x".to_string(), Value::int(1));

        let child = Environment::with_parent(parent);
        child.set_variable("x".to_string(), Value::int(2));

        assert_eq!(child.try_get_variable("x").unwrap().as_int().unwrap(), 2);
    }

    #[test]
    fn test_parent_lookup() {
        let parent = Environment::new();
        parent.set_variable("x".to_string(), Value::int(1));
        let child = Environment::with_parent(parent);
        assert_eq!(child.try_get_variable("x").unwrap().as_int().unwrap(), 1);
    }

    #[test]
    fn test_let_scope_does_not_leak_to_parent() {
        let parent = Environment::new();
        let child = Environment::with_parent(parent.clone());
        child.set_variable("y".to_string(), Value::int(5));
        assert!(parent.try_get_variable("y").is_none());
    }

    #[test]
    fn test_builtin_table_not_chained_but_shared() {
        let parent = Environment::new();
        let child = Environment::with_parent(parent.clone());
        assert!(child.try_get_builtin("+").is_some());
        assert!(parent.try_get_builtin("+").is_some());
    }

    #[test]
    fn test_user_function_lookup() {
        let env = Environment::new();
        env.set_user_function(
            "f".to_string(),
            UserFunction {
                name: "f".to_string(),
                params: vec!["x".to_string()],
                body: Value::list(vec![Value::ident("x", 1)], 1),
            },
        );
        assert!(env.try_get_user_function("f").is_some());
        assert!(env.try_get_user_function("g").is_none());
    }
}
