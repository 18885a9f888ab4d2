//! # Dependency Tree
//!
//! The tree records which package requested which, as discovered while
//! fetching. Nodes live in an arena and refer to each other by `NodeId`:
//! a node owns the ids of its children and remembers the id of its parent,
//! which is only ever used to report the chain of packages that pulled a
//! dependency in.
//!
//! Index 0 is a sentinel root standing for the project itself. It carries no
//! descriptor and is never yielded by traversals or shown in dumps.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io;

use ptree::TreeItem;

use crate::package::PackageDescriptor;

/// Index of a node in a `DependencyTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// `None` only for the sentinel root.
    pub descriptor: Option<PackageDescriptor>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Arena of dependency nodes rooted at a sentinel.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    nodes: Vec<Node>,
}

impl Default for DependencyTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyTree {
    /// Create a tree holding only the sentinel root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                descriptor: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, sentinel included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing but the sentinel is present.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The descriptor of a real node; `None` for the sentinel.
    pub fn descriptor(&self, id: NodeId) -> Option<&PackageDescriptor> {
        self.nodes[id.0].descriptor.as_ref()
    }

    pub fn descriptor_mut(&mut self, id: NodeId) -> Option<&mut PackageDescriptor> {
        self.nodes[id.0].descriptor.as_mut()
    }

    /// Append a node for `descriptor` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, descriptor: PackageDescriptor) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            descriptor: Some(descriptor),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Breadth-first traversal of everything below `start`, not including
    /// `start` itself.
    pub fn breadth_first(&self, start: NodeId) -> BreadthFirst<'_> {
        BreadthFirst {
            tree: self,
            queue: self.children(start).iter().copied().collect(),
        }
    }

    /// The chain of real ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.nodes[id.0].parent,
        }
    }

    /// Depth below the sentinel: direct dependencies are at depth 1.
    pub fn depth(&self, id: NodeId) -> usize {
        if self.nodes[id.0].descriptor.is_none() {
            return 0;
        }
        self.ancestors(id).count() + 1
    }

    /// Indented listing of the tree, one `source branch/revision` per line,
    /// two spaces deeper for every level.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for &child in self.children(self.root()) {
            self.dump_indent(child, 0, &mut out);
        }
        out
    }

    fn dump_indent(&self, id: NodeId, indent: usize, out: &mut String) {
        if let Some(pkg) = self.descriptor(id) {
            out.push_str(&" ".repeat(indent));
            out.push_str(&format!("{} {}\n", pkg.source, pkg.git_ref()));
        }
        for &child in self.children(id) {
            self.dump_indent(child, indent + 2, out);
        }
    }

    /// A `ptree` view rooted at the sentinel, labelled `root_label`.
    pub fn view<'a>(&'a self, root_label: &'a str) -> TreeView<'a> {
        TreeView {
            tree: self,
            id: self.root(),
            root_label,
        }
    }
}

/// Lazy breadth-first iterator; see [`DependencyTree::breadth_first`].
pub struct BreadthFirst<'a> {
    tree: &'a DependencyTree,
    queue: VecDeque<NodeId>,
}

impl Iterator for BreadthFirst<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.queue.pop_front()?;
        self.queue.extend(self.tree.children(id).iter().copied());
        Some(id)
    }
}

/// Iterator over real ancestors; see [`DependencyTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a DependencyTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        let node = self.tree.node(id);
        // Stop at the sentinel.
        node.descriptor.as_ref()?;
        self.next = node.parent;
        Some(id)
    }
}

/// Tree node view for ptree visualization
#[derive(Clone)]
pub struct TreeView<'a> {
    tree: &'a DependencyTree,
    id: NodeId,
    root_label: &'a str,
}

impl TreeItem for TreeView<'_> {
    type Child = Self;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        match self.tree.descriptor(self.id) {
            Some(pkg) => write!(f, "{} ({} @ {})", pkg.name, pkg.source, pkg.git_ref()),
            None => write!(f, "{}", self.root_label),
        }
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Owned(
            self.tree
                .children(self.id)
                .iter()
                .map(|&id| TreeView {
                    tree: self.tree,
                    id,
                    root_label: self.root_label,
                })
                .collect(),
        )
    }
}
