//! Persistent lexical scopes shared by the interpreter and the type checker.
//!
//! A scope is an immutable chain of frames behind `Rc`. Extending a scope
//! allocates a new frame that points at its parent; the parent is never
//! touched, so a closure can keep its defining scope alive after the code
//! that created it has returned, and shadowed bindings survive in the
//! parent for everyone else still holding it.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

struct Frame<T> {
    bindings: HashMap<String, T>,
    parent: Option<Rc<Frame<T>>>,
}

/// An immutable name-to-`T` mapping with copy-on-extend semantics
pub struct Scope<T> {
    head: Option<Rc<Frame<T>>>,
}

impl<T> Scope<T> {
    /// Create an empty scope
    pub fn new() -> Self {
        Self { head: None }
    }

    /// A child scope with one extra binding
    pub fn extend(&self, name: impl Into<String>, value: T) -> Self {
        let mut bindings = HashMap::with_capacity(1);
        bindings.insert(name.into(), value);
        self.push_frame(bindings)
    }

    /// A child scope holding all of `bindings` in a single frame.
    /// Later duplicates of the same name win.
    pub fn extend_many(&self, bindings: impl IntoIterator<Item = (String, T)>) -> Self {
        let bindings: HashMap<String, T> = bindings.into_iter().collect();
        if bindings.is_empty() {
            return self.clone();
        }
        self.push_frame(bindings)
    }

    fn push_frame(&self, bindings: HashMap<String, T>) -> Self {
        Self {
            head: Some(Rc::new(Frame {
                bindings,
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up a name, searching from the innermost frame outwards
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.frames().find_map(|frame| frame.bindings.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of frames in the chain
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Every binding in the chain, innermost first, shadowed ones included
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.frames()
            .flat_map(|frame| frame.bindings.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn frames(&self) -> impl Iterator<Item = &Frame<T>> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent.as_deref())
    }
}

impl<T> Clone for Scope<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for Scope<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(String, T)> for Scope<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self::new().extend_many(iter)
    }
}

impl<T> fmt::Debug for Scope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.iter().map(|(name, _)| name).collect();
        names.sort_unstable();
        names.dedup();
        f.debug_struct("Scope")
            .field("depth", &self.depth())
            .field("names", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_walks_outwards() {
        let outer = Scope::new().extend("x", 1);
        let inner = outer.extend("y", 2);

        assert_eq!(inner.lookup("x"), Some(&1));
        assert_eq!(inner.lookup("y"), Some(&2));
        assert_eq!(inner.lookup("z"), None);
        assert_eq!(inner.depth(), 2);
    }

    #[test]
    fn test_extend_does_not_touch_parent() {
        let parent = Scope::new().extend("x", 1);
        let child = parent.extend("x", 10).extend("y", 2);

        assert_eq!(child.lookup("x"), Some(&10));
        assert_eq!(parent.lookup("x"), Some(&1));
        assert!(!parent.contains("y"));
    }

    #[test]
    fn test_extend_many_single_frame() {
        let scope: Scope<i32> = Scope::new().extend_many(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("a".to_string(), 3),
        ]);
        assert_eq!(scope.depth(), 1);
        assert_eq!(scope.lookup("a"), Some(&3));
        assert_eq!(scope.lookup("b"), Some(&2));
    }

    #[test]
    fn test_extend_many_empty_reuses_scope() {
        let scope = Scope::new().extend("x", 1);
        let same = scope.extend_many(Vec::new());
        assert_eq!(same.depth(), 1);
    }

    #[test]
    fn test_iter_includes_shadowed() {
        let scope = Scope::new().extend("x", 1).extend("x", 2);
        let values: Vec<i32> = scope.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![2, 1]);
    }

    #[test]
    fn test_empty_scope() {
        let scope: Scope<()> = Scope::default();
        assert!(scope.is_empty());
        assert_eq!(scope.depth(), 0);
        assert!(scope.lookup("anything").is_none());
    }
}
