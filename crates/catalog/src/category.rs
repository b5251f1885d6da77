use serde::{Deserialize, Serialize};

use oxcart_core::{CategoryId, Entity};

/// A named node in the category tree.
///
/// Categories reference each other by typed id, never by pointer; the
/// registry owns every node. The structure is a tree by construction
/// (children are only attached through the registry, which sets the
/// parent back-reference at the same time) - there is no runtime cycle
/// check.
///
/// Sibling-name uniqueness is enforced by the registry, which is the only
/// place that can see all siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: String,
    parent: Option<CategoryId>,
    children: Vec<CategoryId>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parent: Option<CategoryId>,
    ) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: description.into(),
            parent,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> Option<CategoryId> {
        self.parent
    }

    pub fn children(&self) -> &[CategoryId] {
        &self.children
    }

    /// Attach a subcategory id. Called by the registry when the child is
    /// created with this node as parent.
    pub fn add_child(&mut self, child: CategoryId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_category_has_no_parent() {
        let root = Category::new("Electronics", "Devices and accessories", None);
        assert!(root.parent().is_none());
        assert!(root.children().is_empty());
    }

    #[test]
    fn add_child_is_idempotent() {
        let mut root = Category::new("Electronics", "", None);
        let child = CategoryId::new();
        root.add_child(child);
        root.add_child(child);
        assert_eq!(root.children(), &[child]);
    }
}
