// ~/privshield/src/selection.rs
//
// Check-state tree over the catalog and the flat selection set derived from it.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::SelectionError;
use crate::setting::Setting;
use crate::info;

pub enum NodeKind {
    Group(Vec<Node>),
    Leaf {
        category: &'static str,
        setting: Arc<dyn Setting>,
    },
}

pub struct Node {
    pub label: String,
    pub checked: bool,
    pub kind: NodeKind,
}

impl Node {
    fn group(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self { label: label.into(), checked: false, kind: NodeKind::Group(children) }
    }

    /// Set this node and every descendant.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
        if let NodeKind::Group(children) = &mut self.kind {
            for child in children {
                child.set_checked(checked);
            }
        }
    }

    fn child_mut(&mut self, label: &str) -> Option<&mut Node> {
        match &mut self.kind {
            NodeKind::Group(children) => children.iter_mut().find(|c| c.label.eq_ignore_ascii_case(label)),
            NodeKind::Leaf { .. } => None,
        }
    }

    fn collect_into(&self, out: &mut Vec<SelectedSetting>) {
        match &self.kind {
            NodeKind::Leaf { category, setting } => {
                if self.checked {
                    out.push(SelectedSetting { category: *category, setting: setting.clone() });
                }
            }
            NodeKind::Group(children) => {
                for child in children {
                    child.collect_into(out);
                }
            }
        }
    }
}

/// Root → categories → settings.
pub struct SelectionTree {
    root: Node,
}

impl SelectionTree {
    pub fn new(root_label: impl Into<String>, catalog: &Catalog) -> Self {
        let categories = catalog
            .categories
            .iter()
            .map(|category| {
                let leaves = category
                    .settings
                    .iter()
                    .map(|setting| Node {
                        label: setting.id().to_string(),
                        checked: false,
                        kind: NodeKind::Leaf { category: category.name, setting: setting.clone() },
                    })
                    .collect();
                Node::group(category.name, leaves)
            })
            .collect();

        Self { root: Node::group(root_label, categories) }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Check or uncheck a node and everything below it.
    ///
    /// `path` is `Category` or `Category/Setting`, compared case-insensitively;
    /// `*` or the root label addresses the whole tree.
    pub fn set_checked(&mut self, path: &str, checked: bool) -> Result<(), SelectionError> {
        let path = path.trim();
        if path == "*" || path.eq_ignore_ascii_case(&self.root.label) {
            self.root.set_checked(checked);
            return Ok(());
        }

        let (category, setting) = match path.split_once('/') {
            Some((c, s)) => (c.trim(), Some(s.trim())),
            None => (path, None),
        };

        let unknown = || SelectionError::UnknownPath(path.to_string());
        let mut node = self.root.child_mut(category).ok_or_else(unknown)?;
        if let Some(setting) = setting {
            node = node.child_mut(setting).ok_or_else(unknown)?;
        }

        info!("Selection: '{}' -> {}", node.label, checked);
        node.set_checked(checked);
        Ok(())
    }

    pub fn check_all(&mut self) {
        self.root.set_checked(true);
    }

    /// Checked settings in catalog order.
    pub fn collect(&self) -> Selection {
        let mut entries = Vec::new();
        self.root.collect_into(&mut entries);
        Selection::new(entries)
    }
}

#[derive(Clone)]
pub struct SelectedSetting {
    pub category: &'static str,
    pub setting: Arc<dyn Setting>,
}

/// Ordered selection set plus its per-item progress step.
pub struct Selection {
    entries: Vec<SelectedSetting>,
    increment: u32,
}

impl Selection {
    pub fn new(entries: Vec<SelectedSetting>) -> Self {
        // Floor on purpose; the runner forces 100 at the end.
        let increment = match entries.len() {
            0 => 0,
            n => (100 / n) as u32,
        };
        Self { entries, increment }
    }

    pub fn entries(&self) -> &[SelectedSetting] {
        &self.entries
    }

    pub fn increment(&self) -> u32 {
        self.increment
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::SystemHandles;

    fn tree() -> SelectionTree {
        let catalog = Catalog::build(&SystemHandles::simulated());
        SelectionTree::new("Windows 10 (test)", &catalog)
    }

    fn kids(node: &Node) -> &[Node] {
        match &node.kind {
            NodeKind::Group(children) => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    fn all_leaves(node: &Node, out: &mut Vec<bool>) {
        match &node.kind {
            NodeKind::Leaf { .. } => out.push(node.checked),
            NodeKind::Group(children) => children.iter().for_each(|c| all_leaves(c, out)),
        }
    }

    #[test]
    fn nothing_selected_initially() {
        let sel = tree().collect();
        assert!(sel.is_empty());
        assert_eq!(sel.increment(), 0);
    }

    #[test]
    fn checking_category_checks_every_child() {
        let mut t = tree();
        t.set_checked("privacy", true).unwrap();

        let privacy = &kids(t.root())[0];
        assert!(privacy.checked);
        assert!(kids(privacy).iter().all(|c| c.checked));

        let sel = t.collect();
        assert_eq!(sel.len(), 20);
        assert!(sel.entries().iter().all(|e| e.category == "Privacy"));
        assert_eq!(sel.increment(), 5);

        t.set_checked("Privacy", false).unwrap();
        assert!(kids(&kids(t.root())[0]).iter().all(|c| !c.checked));
        assert!(t.collect().is_empty());
    }

    #[test]
    fn root_cascades_through_every_depth() {
        let mut t = tree();
        t.set_checked("*", true).unwrap();
        let mut leaves = Vec::new();
        all_leaves(t.root(), &mut leaves);
        assert_eq!(leaves.len(), 60);
        assert!(leaves.iter().all(|c| *c));

        t.set_checked("Windows 10 (test)", false).unwrap();
        leaves.clear();
        all_leaves(t.root(), &mut leaves);
        assert!(leaves.iter().all(|c| !*c));
    }

    #[test]
    fn collection_keeps_catalog_order() {
        let mut t = tree();
        t.set_checked("Security", true).unwrap();
        t.set_checked("Gaming/Disable Game Bar features", true).unwrap();
        t.set_checked("Privacy/Disable Telemetry", true).unwrap();

        let sel = t.collect();
        let got: Vec<(&str, &str)> = sel.entries().iter().map(|e| (e.category, e.setting.id())).collect();
        assert_eq!(
            got,
            [
                ("Privacy", "Disable Telemetry"),
                ("Gaming", "Disable Game Bar features"),
                ("Security", "Disable password reveal button"),
                ("Security", "Disable DRM in Windows Media Player"),
            ]
        );
        assert_eq!(sel.increment(), 25);
    }

    #[test]
    fn increment_floors() {
        let mut t = tree();
        t.set_checked("Updates", true).unwrap();
        assert_eq!(t.collect().increment(), 33);
    }

    #[test]
    fn unknown_paths_are_rejected() {
        let mut t = tree();
        assert!(t.set_checked("Telemetry", true).is_err());
        assert!(t.set_checked("Privacy/Nope", true).is_err());
        assert!(t.collect().is_empty());
    }
}
