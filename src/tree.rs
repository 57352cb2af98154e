use log::debug;
use std::collections::BTreeMap;
use std::ops::Range;
use std::time::Instant;

use crate::alphabet::Text;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

/// The root is always the first node of the arena.
pub const ROOT: NodeId = 0;

/// A node of the compressed suffix tree.
///
/// The incoming edge is labeled by `text[edge]`. Children are keyed by the
/// rank of the first symbol of their edge, so iteration visits them in
/// ascending symbol order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    parent: Option<NodeId>,
    children: BTreeMap<u8, NodeId>,
    string_depth: usize,
    edge: Range<usize>,
    occurs: Option<usize>,
}

impl Node {
    fn root() -> Self {
        Node {
            parent: None,
            children: BTreeMap::new(),
            string_depth: 0,
            edge: 0..0,
            occurs: None,
        }
    }

    /// Parent of this node, `None` for the root.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child whose edge starts with the symbol of rank `first`.
    #[inline]
    pub fn child(&self, first: u8) -> Option<NodeId> {
        self.children.get(&first).copied()
    }

    /// Children in ascending order of their first edge symbol.
    pub fn children(&self) -> impl Iterator<Item = (u8, NodeId)> + '_ {
        self.children.iter().map(|(&first, &id)| (first, id))
    }

    #[inline]
    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// Length of the path label from the root to this node.
    #[inline]
    pub fn string_depth(&self) -> usize {
        self.string_depth
    }

    /// Half-open range of the text labeling the incoming edge.
    #[inline]
    pub fn edge(&self) -> Range<usize> {
        self.edge.clone()
    }

    /// Start of the suffix this leaf spells. `None` for internal nodes.
    #[inline]
    pub fn occurs(&self) -> Option<usize> {
        self.occurs
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.occurs.is_some()
    }
}

/// A compressed suffix tree stored as an arena of nodes.
///
/// The tree does not own its text: edge labels are ranges into the [`Text`]
/// it was built from, which every query takes by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuffixTree {
    nodes: Vec<Node>,
}

impl SuffixTree {
    /// Builds the tree in `O(n)` from the suffix array and its LCP array.
    ///
    /// Suffixes are inserted in sorted order. Each one branches off the path
    /// of the previous suffix at depth `lcp[i - 1]`: either at an existing
    /// node, or in the middle of an edge, which is then split.
    pub fn from_suffix_array(text: &Text, table: &[usize], lcp: &[usize]) -> Self {
        let start = Instant::now();
        let ranks = text.ranks();
        let mut tree = SuffixTree {
            nodes: Vec::with_capacity(2 * table.len()),
        };
        tree.nodes.push(Node::root());

        let mut curr = ROOT;
        let mut lcp_prev = 0;
        for (i, &suffix) in table.iter().enumerate() {
            while tree.nodes[curr].string_depth > lcp_prev {
                match tree.nodes[curr].parent {
                    Some(parent) => curr = parent,
                    None => break,
                }
            }

            let depth = tree.nodes[curr].string_depth;
            let parent = if depth == lcp_prev {
                curr
            } else {
                // The common prefix ends inside the edge leading towards the
                // previous suffix.
                let first = ranks[table[i - 1] + depth];
                tree.break_edge(text, curr, first, lcp_prev - depth)
            };
            curr = tree.new_leaf(text, parent, suffix);

            if let Some(&next) = lcp.get(i) {
                lcp_prev = next;
            }
        }

        debug!(
            "Built suffix tree with {} nodes in {:?}",
            tree.nodes.len(),
            start.elapsed()
        );
        tree
    }

    fn new_leaf(&mut self, text: &Text, parent: NodeId, suffix: usize) -> NodeId {
        let id = self.nodes.len();
        let edge_start = suffix + self.nodes[parent].string_depth;
        self.nodes.push(Node {
            parent: Some(parent),
            children: BTreeMap::new(),
            string_depth: text.len() - suffix,
            edge: edge_start..text.len(),
            occurs: Some(suffix),
        });

        let replaced = self.nodes[parent]
            .children
            .insert(text.ranks()[edge_start], id);
        debug_assert!(replaced.is_none(), "two edges out of one node share a first symbol");
        id
    }

    /// Splits the edge from `node` to its child keyed by `first` after
    /// `offset` symbols and returns the new internal node.
    fn break_edge(&mut self, text: &Text, node: NodeId, first: u8, offset: usize) -> NodeId {
        let child = self.nodes[node].children[&first];
        let child_start = self.nodes[child].edge.start;
        let mid = self.nodes.len();

        let mut children = BTreeMap::new();
        children.insert(text.ranks()[child_start + offset], child);
        self.nodes.push(Node {
            parent: Some(node),
            children,
            string_depth: self.nodes[node].string_depth + offset,
            edge: child_start..child_start + offset,
            occurs: None,
        });

        self.nodes[child].parent = Some(mid);
        self.nodes[child].edge.start += offset;
        self.nodes[node].children.insert(first, mid);
        mid
    }

    /// Returns the root id.
    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Returns the node with the given id.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All nodes with their ids, in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Symbols labeling the edge into `id`.
    pub fn edge_label<'t>(&self, text: &'t Text, id: NodeId) -> &'t [u8] {
        &text.symbols()[self.nodes[id].edge.clone()]
    }

    /// Symbols spelled from the root down to `id`.
    ///
    /// Every edge is a slice of some suffix running through its node, so the
    /// path label is the `string_depth` symbols ending where the edge ends.
    pub fn path_label<'t>(&self, text: &'t Text, id: NodeId) -> &'t [u8] {
        let node = &self.nodes[id];
        &text.symbols()[node.edge.end - node.string_depth..node.edge.end]
    }

    /// Ids on the path from the root to `id`, excluding the root.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut curr = id;
        while let Some(parent) = self.nodes[curr].parent {
            path.push(curr);
            curr = parent;
        }
        path.reverse();
        path
    }

    /// Walks `pattern` (given as ranks) down from the root.
    ///
    /// Returns the node whose subtree holds exactly the suffixes starting
    /// with `pattern`. When the pattern ends in the middle of an edge, that is
    /// the node the edge leads to. An empty pattern locates nothing.
    pub fn locate(&self, text: &Text, pattern: &[u8]) -> Option<NodeId> {
        if pattern.is_empty() {
            return None;
        }

        let ranks = text.ranks();
        let mut node = ROOT;
        let mut consumed = 0;
        while consumed < pattern.len() {
            let child = self.nodes[node].child(pattern[consumed])?;
            let label = &ranks[self.nodes[child].edge.clone()];
            let rest = &pattern[consumed..];

            if rest.len() >= label.len() {
                if !rest.starts_with(label) {
                    return None;
                }
                consumed += label.len();
            } else {
                if !label.starts_with(rest) {
                    return None;
                }
                consumed = pattern.len();
            }
            node = child;
        }
        Some(node)
    }

    /// Returns every position where `pattern` (given as ranks) starts, in
    /// suffix order.
    pub fn find(&self, text: &Text, pattern: &[u8]) -> Vec<usize> {
        match self.locate(text, pattern) {
            Some(node) => self.leaves_under(node),
            None => Vec::new(),
        }
    }

    /// Suffix starts of all leaves below `id` (or `id` itself if it is a
    /// leaf), visited in pre-order with children in ascending symbol order.
    /// The result is therefore in suffix array order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree.
    pub fn leaves_under(&self, id: NodeId) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(suffix) = node.occurs {
                leaves.push(suffix);
            }
            // Pushed in reverse so the smallest first symbol pops first.
            stack.extend(node.children.values().rev());
        }
        leaves
    }

    /// Paths (root excluded) to every node whose incoming edge is labeled
    /// exactly `label`, ordered by node id.
    pub fn paths_to_label(&self, text: &Text, label: &[u8]) -> Vec<Vec<NodeId>> {
        (1..self.nodes.len())
            .filter(|&id| self.edge_label(text, id) == label)
            .map(|id| self.path_to(id))
            .collect()
    }

    /// Renders one edge label per line. Children follow their parent,
    /// indented one tab deeper, in ascending symbol order.
    pub fn render(&self, text: &Text) -> String {
        let mut lines = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, usize)> = self.nodes[ROOT]
            .children
            .values()
            .rev()
            .map(|&id| (id, 0))
            .collect();

        while let Some((id, level)) = stack.pop() {
            let edge = self.nodes[id].edge.clone();
            lines.push(format!("{}{}", "\t".repeat(level), text.slice_to_string(edge)));
            stack.extend(self.nodes[id].children.values().rev().map(|&c| (c, level + 1)));
        }
        lines.join("\n")
    }
}
