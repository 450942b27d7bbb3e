//! # Category State
//!
//! Owns the category tree and the currently selected category.
//!
//! ```text
//! CategoryState
//! ├── tree: Vec<CategoryNode>     // roots, children nested
//! └── selected: CategoryFilter    // "all" or a category name
//! ```
//!
//! All tree walks go through [`find_path`] and [`visit_preorder`], so every
//! lookup agrees on "first pre-order match".

use crate::gateway::{CategoryFilter, CategoryNode};

/// A flattened tree row for display: depth plus the node itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRow<'a> {
    pub depth: usize,
    pub node: &'a CategoryNode,
}

#[derive(Debug, Default)]
pub struct CategoryState {
    tree: Vec<CategoryNode>,
    selected: CategoryFilter,
}

impl CategoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole tree. The last call wins.
    pub fn load(&mut self, tree: Vec<CategoryNode>) {
        self.tree = tree;
    }

    /// Selects a category by key. Unknown names are accepted as-is.
    pub fn select(&mut self, key: &str) {
        self.selected = CategoryFilter::from_key(key);
    }

    pub fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    pub fn tree(&self) -> &[CategoryNode] {
        &self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Display name of the first node with this id.
    pub fn resolve_name(&self, id: &str) -> Option<&str> {
        let mut path = Vec::new();
        if find_path(&self.tree, &|node| node.id == id, &mut path) {
            path.pop().map(|node| node.name.as_str())
        } else {
            None
        }
    }

    /// Root-to-node names for the first node with this name.
    pub fn resolve_ancestry(&self, name: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        if find_path(&self.tree, &|node| node.name == name, &mut path) {
            Some(path.iter().map(|node| node.name.clone()).collect())
        } else {
            None
        }
    }

    /// The tree in pre-order with depths.
    pub fn rows(&self) -> Vec<CategoryRow<'_>> {
        let mut rows = Vec::new();
        visit_preorder(&self.tree, 0, &mut |depth, node| {
            rows.push(CategoryRow { depth, node })
        });
        rows
    }
}

/// Depth-first, pre-order search. On a match `path` holds root..=match.
pub fn find_path<'a>(
    nodes: &'a [CategoryNode],
    matches: &dyn Fn(&CategoryNode) -> bool,
    path: &mut Vec<&'a CategoryNode>,
) -> bool {
    for node in nodes {
        path.push(node);
        if matches(node) || find_path(&node.children, matches, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Calls `visit` on every node in pre-order.
pub fn visit_preorder<'a>(
    nodes: &'a [CategoryNode],
    depth: usize,
    visit: &mut dyn FnMut(usize, &'a CategoryNode),
) {
    for node in nodes {
        visit(depth, node);
        visit_preorder(&node.children, depth + 1, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<CategoryNode> {
        vec![
            CategoryNode {
                id: "1".to_string(),
                name: "Tech".to_string(),
                children: vec![
                    CategoryNode::leaf("5", "AI"),
                    CategoryNode {
                        id: "6".to_string(),
                        name: "Blockchain".to_string(),
                        children: vec![CategoryNode::leaf("9", "DeFi")],
                    },
                ],
            },
            CategoryNode::leaf("2", "Finance"),
            // Duplicate name deeper in a later subtree
            CategoryNode {
                id: "3".to_string(),
                name: "Sports".to_string(),
                children: vec![CategoryNode::leaf("7", "AI")],
            },
        ]
    }

    fn loaded() -> CategoryState {
        let mut state = CategoryState::new();
        state.load(sample_tree());
        state
    }

    #[test]
    fn test_new_state_selects_all() {
        let state = CategoryState::new();
        assert_eq!(state.selected(), &CategoryFilter::All);
        assert!(state.is_empty());
    }

    #[test]
    fn test_resolve_name_finds_nested_ids() {
        let state = loaded();
        assert_eq!(state.resolve_name("1"), Some("Tech"));
        assert_eq!(state.resolve_name("9"), Some("DeFi"));
        assert_eq!(state.resolve_name("42"), None);
    }

    #[test]
    fn test_resolve_ancestry_returns_root_to_node_path() {
        let state = loaded();
        assert_eq!(
            state.resolve_ancestry("DeFi"),
            Some(vec![
                "Tech".to_string(),
                "Blockchain".to_string(),
                "DeFi".to_string()
            ])
        );
        assert_eq!(state.resolve_ancestry("Finance"), Some(vec!["Finance".to_string()]));
    }

    #[test]
    fn test_resolve_ancestry_uses_first_preorder_match() {
        let state = loaded();
        assert_eq!(
            state.resolve_ancestry("AI"),
            Some(vec!["Tech".to_string(), "AI".to_string()])
        );
    }

    #[test]
    fn test_lookups_are_case_sensitive() {
        let state = loaded();
        assert_eq!(state.resolve_ancestry("tech"), None);
        assert_eq!(state.resolve_ancestry("Missing"), None);
    }

    #[test]
    fn test_select_accepts_unknown_categories() {
        let mut state = loaded();
        state.select("Nonexistent");
        assert_eq!(
            state.selected(),
            &CategoryFilter::Named("Nonexistent".to_string())
        );
        state.select("all");
        assert_eq!(state.selected(), &CategoryFilter::All);
    }

    #[test]
    fn test_load_replaces_tree() {
        let mut state = loaded();
        state.load(vec![CategoryNode::leaf("10", "Culture")]);
        assert_eq!(state.tree().len(), 1);
        assert_eq!(state.resolve_name("1"), None);
    }

    #[test]
    fn test_rows_are_preorder_with_depth() {
        let state = loaded();
        let rows: Vec<(usize, &str)> = state
            .rows()
            .iter()
            .map(|row| (row.depth, row.node.name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (0, "Tech"),
                (1, "AI"),
                (1, "Blockchain"),
                (2, "DeFi"),
                (0, "Finance"),
                (0, "Sports"),
                (1, "AI"),
            ]
        );
    }
}
