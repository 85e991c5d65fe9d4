//! A generic prefix trie keyed by path components.
//!
//! `PathTrie<T>` provides O(k) operations where k is the path depth.
//! Each node can optionally hold a value, and has children indexed by path component.

use crate::Path;
use std::collections::BTreeMap;

/// A prefix trie keyed by path components.
///
/// Each node can optionally hold a value of type T, and has children
/// indexed by path component strings. Children are kept in a `BTreeMap`,
/// so iteration is always in name order.
///
/// # Example
///
/// ```rust
/// use swaggerui_vfs::{PathTrie, path};
///
/// let mut trie: PathTrie<i32> = PathTrie::new();
/// trie.insert(&path!("a/b"), 1);
///
/// assert_eq!(trie.get(&path!("a/b")), Some(&1));
///
/// // find_ancestor returns the deepest value along the path
/// let (value, suffix) = trie.find_ancestor(&path!("a/b/c/d")).unwrap();
/// assert_eq!(*value, 1);
/// assert_eq!(suffix, path!("c/d"));
/// ```
#[derive(Debug, Clone)]
pub struct PathTrie<T> {
    value: Option<T>,
    children: BTreeMap<String, PathTrie<T>>,
}

impl<T> Default for PathTrie<T> {
    fn default() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<T> PathTrie<T> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to node, creating intermediate nodes as needed.
    fn get_or_create_node(&mut self, path: &Path) -> &mut PathTrie<T> {
        let mut current = self;
        for component in &path.components {
            current = current.children.entry(component.clone()).or_default();
        }
        current
    }

    /// Navigate to node if it exists.
    fn get_node(&self, path: &Path) -> Option<&PathTrie<T>> {
        let mut current = self;
        for component in &path.components {
            current = current.children.get(component)?;
        }
        Some(current)
    }

    /// Insert a value at path. Returns previous value if any.
    pub fn insert(&mut self, path: &Path, value: T) -> Option<T> {
        let node = self.get_or_create_node(path);
        node.value.replace(value)
    }

    /// Get reference to value at exact path.
    pub fn get(&self, path: &Path) -> Option<&T> {
        self.get_node(path)?.value.as_ref()
    }

    /// Get reference to subtrie at path.
    pub fn get_subtrie(&self, path: &Path) -> Option<&PathTrie<T>> {
        self.get_node(path)
    }

    /// The value held by this node.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Direct children of this node, in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathTrie<T>)> {
        self.children
            .iter()
            .map(|(name, child)| (name.as_str(), child))
    }

    /// True if this node has at least one child.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Count of values in trie (not nodes).
    pub fn len(&self) -> usize {
        let self_count = if self.value.is_some() { 1 } else { 0 };
        let children_count: usize = self.children.values().map(|child| child.len()).sum();
        self_count + children_count
    }

    /// True if no values anywhere in trie.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.values().all(|c| c.is_empty())
    }

    /// Find deepest ancestor with a value.
    /// Returns (value_ref, remaining_suffix).
    pub fn find_ancestor(&self, path: &Path) -> Option<(&T, Path)> {
        let mut current = self;
        let mut last_value: Option<&T> = self.value.as_ref();
        let mut last_depth: usize = 0;

        for (depth, component) in path.components.iter().enumerate() {
            match current.children.get(component) {
                Some(child) => {
                    current = child;
                    if child.value.is_some() {
                        last_value = child.value.as_ref();
                        last_depth = depth + 1;
                    }
                }
                None => break,
            }
        }

        last_value.map(|v| {
            let suffix = Path {
                components: path.components[last_depth..].to_vec(),
            };
            (v, suffix)
        })
    }

    /// Iterate over all (path, value) pairs.
    pub fn iter(&self) -> PathTrieIter<'_, T> {
        PathTrieIter::new(self)
    }
}

/// Iterator over (Path, &T) pairs in a PathTrie.
pub struct PathTrieIter<'a, T> {
    stack: Vec<(Path, &'a PathTrie<T>)>,
}

impl<'a, T> PathTrieIter<'a, T> {
    fn new(trie: &'a PathTrie<T>) -> Self {
        Self {
            stack: vec![(Path::root(), trie)],
        }
    }
}

impl<'a, T> Iterator for PathTrieIter<'a, T> {
    type Item = (Path, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            // Push children onto stack (in reverse order for correct iteration)
            for (name, child) in node.children.iter().rev() {
                let mut components = path.components.clone();
                components.push(name.clone());
                self.stack.push((Path { components }, child));
            }

            if let Some(ref value) = node.value {
                return Some((path, value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    #[test]
    fn new_trie_is_empty() {
        let trie: PathTrie<i32> = PathTrie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
    }

    #[test]
    fn insert_and_get() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        trie.insert(&path!("a/b"), 42);

        assert_eq!(trie.get(&path!("a/b")), Some(&42));
        assert_eq!(trie.get(&path!("a")), None);
        assert_eq!(trie.get(&path!("a/b/c")), None);
    }

    #[test]
    fn insert_returns_previous() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        assert_eq!(trie.insert(&path!("a"), 1), None);
        assert_eq!(trie.insert(&path!("a"), 2), Some(1));
        assert_eq!(trie.get(&path!("a")), Some(&2));
    }

    #[test]
    fn intermediate_nodes_have_no_value() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        trie.insert(&path!("dist/css/index.css"), 1);

        let dist = trie.get_subtrie(&path!("dist")).unwrap();
        assert!(dist.value().is_none());
        assert!(dist.has_children());
        assert_eq!(trie.get(&path!("dist")), None);
        assert_eq!(trie.get(&path!("dist/css/index.css")), Some(&1));
    }

    #[test]
    fn children_in_name_order() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        trie.insert(&path!("b"), 2);
        trie.insert(&path!("a"), 1);
        trie.insert(&path!("c/d"), 3);

        let names: Vec<&str> = trie.children().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn len_counts_values_only() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        trie.insert(&path!("a"), 1);
        trie.insert(&path!("x/y/z"), 2);
        assert_eq!(trie.len(), 2);
        assert!(!trie.is_empty());
    }

    #[test]
    fn find_ancestor_deeper_wins() {
        let mut trie: PathTrie<&str> = PathTrie::new();
        trie.insert(&path!("data"), "data");
        trie.insert(&path!("data/cache"), "cache");

        let (value, suffix) = trie.find_ancestor(&path!("data/cache/hot")).unwrap();
        assert_eq!(*value, "cache");
        assert_eq!(suffix, path!("hot"));

        let (value, suffix) = trie.find_ancestor(&path!("data/users/1")).unwrap();
        assert_eq!(*value, "data");
        assert_eq!(suffix, path!("users/1"));
    }

    #[test]
    fn find_ancestor_no_match() {
        let mut trie: PathTrie<&str> = PathTrie::new();
        trie.insert(&path!("data"), "data");

        assert!(trie.find_ancestor(&path!("other/path")).is_none());
    }

    #[test]
    fn find_ancestor_exact_match() {
        let mut trie: PathTrie<&str> = PathTrie::new();
        trie.insert(&path!("data"), "data");

        let (value, suffix) = trie.find_ancestor(&path!("data")).unwrap();
        assert_eq!(*value, "data");
        assert!(suffix.is_empty());
    }

    #[test]
    fn iter_visits_all_values_in_order() {
        let mut trie: PathTrie<i32> = PathTrie::new();
        trie.insert(&path!("b"), 2);
        trie.insert(&path!("a/x"), 1);
        trie.insert(&path!("c"), 3);

        let collected: Vec<(Path, i32)> = trie.iter().map(|(p, v)| (p, *v)).collect();
        assert_eq!(
            collected,
            vec![(path!("a/x"), 1), (path!("b"), 2), (path!("c"), 3)]
        );
    }
}
