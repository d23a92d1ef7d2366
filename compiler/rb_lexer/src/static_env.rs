//! Local-variable table consulted while scanning identifiers.
//!
//! A declared name is scanned as a variable reference, so what follows it is
//! read as a binary operator (`a -1` is `a - 1`). An undeclared name might be
//! a command call, so the same text is read as a call with a negative
//! argument.

use std::collections::HashSet;
use std::hash::BuildHasher;

use rustc_hash::FxHashSet;

/// Symbol table seam. The scanner only asks whether a name is declared.
pub trait StaticEnvironment {
    fn is_declared(&self, name: &str) -> bool;
}

impl<S: BuildHasher> StaticEnvironment for HashSet<String, S> {
    fn is_declared(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Scoped variable table.
///
/// A static scope (method or class body) starts empty. A dynamic scope
/// (block body) starts with everything visible in its parent.
#[derive(Clone, Debug, Default)]
pub struct StaticEnv {
    variables: FxHashSet<String>,
    stack: Vec<FxHashSet<String>>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>) {
        self.variables.insert(name.into());
    }

    pub fn extend_static(&mut self) {
        let outer = std::mem::take(&mut self.variables);
        self.stack.push(outer);
    }

    pub fn extend_dynamic(&mut self) {
        self.stack.push(self.variables.clone());
    }

    /// Leave the innermost scope. Does nothing at the top level.
    pub fn unextend(&mut self) {
        if let Some(outer) = self.stack.pop() {
            self.variables = outer;
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reset(&mut self) {
        self.variables.clear();
        self.stack.clear();
    }
}

impl StaticEnvironment for StaticEnv {
    fn is_declared(&self, name: &str) -> bool {
        self.variables.contains(name)
    }
}
