use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

/// A mapping of variables to values. Basically, a scope. Scopes chain to
/// the parent scope they were created in, and a chain stays alive for as
/// long as any child scope or closure still points into it.
#[derive(Debug, Default)]
pub struct Environment {
    vars: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Self {
            vars: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Create a var with the given name and value in this scope only,
    /// overwriting any previous binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_string(), value);
    }

    /// The value of a var in this scope or the nearest parent one where
    /// it's defined.
    pub fn look_up(env: &Rc<RefCell<Self>>, name: &str) -> Option<Value> {
        let mut current = Rc::clone(env);

        loop {
            if let Some(value) = current.borrow().vars.get(name) {
                return Some(value.clone());
            }

            let parent = current.borrow().parent.clone();
            match parent {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    /// Set an existing var to a value, in whichever scope of the chain it
    /// is bound. Assignment never creates a binding; false means the name
    /// is bound nowhere in the chain.
    pub fn assign(env: &Rc<RefCell<Self>>, name: &str, value: Value) -> bool {
        let mut current = Rc::clone(env);

        loop {
            if current.borrow().vars.contains_key(name) {
                current.borrow_mut().vars.insert(name.to_string(), value);
                return true;
            }

            let parent = current.borrow().parent.clone();
            match parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }
}
