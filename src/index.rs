use log::debug;
use rayon::prelude::*;
use std::time::Instant;

use crate::alphabet::{Alphabet, Text};
use crate::error::ConfigurationError;
use crate::lcp::lcp_array;
use crate::table::SuffixTable;
use crate::tree::{NodeId, SuffixTree};

/// An in-memory substring index over a single text: its suffix table, LCP
/// array and compressed suffix tree.
///
/// Built once, then only queried. Queries take `&self`, so a built index can
/// be shared across threads.
#[derive(Clone, Debug)]
pub struct SuffixIndex {
    alphabet: Alphabet,
    table: SuffixTable,
    lcp: Box<[usize]>,
    tree: SuffixTree,
}

impl SuffixIndex {
    /// Indexes `text` over the default alphabet (`$` then `A`..=`Z`).
    pub fn new(text: &[u8]) -> Result<Self, ConfigurationError> {
        Self::build(text, Alphabet::default())
    }

    /// Indexes `text` over `alphabet`. Fails before any sorting if the text
    /// holds a symbol outside the alphabet or the terminal itself.
    pub fn build(text: &[u8], alphabet: Alphabet) -> Result<Self, ConfigurationError> {
        let start = Instant::now();
        let text = alphabet.encode(text)?;

        let table = SuffixTable::new(text);
        debug_assert!(table.is_sorted());

        let lcp = lcp_array(table.text(), table.table());
        let tree = SuffixTree::from_suffix_array(table.text(), table.table(), &lcp);

        debug!("Indexed {} symbols in {:?}", table.len(), start.elapsed());
        Ok(SuffixIndex {
            alphabet,
            table,
            lcp,
            tree,
        })
    }

    /// Returns every position where `pattern` starts, in suffix order.
    ///
    /// An empty pattern, or one holding symbols outside the alphabet, matches
    /// nothing.
    ///
    /// # Example
    ///
    /// Index a text and find all occurrences of a substring:
    ///
    /// ```rust
    /// use suffixtree::SuffixIndex;
    ///
    /// let index = SuffixIndex::new(b"GATTACAGATTACA").unwrap();
    /// // "TACA$" sorts before "TACAGATTACA$".
    /// assert_eq!(index.find(b"TACA"), vec![10, 3]);
    /// assert!(index.find(b"CAT").is_empty());
    /// ```
    pub fn find(&self, pattern: &[u8]) -> Vec<usize> {
        match self.locate(pattern) {
            Some(node) => self.tree.leaves_under(node),
            None => Vec::new(),
        }
    }

    /// Runs `find` for every pattern in parallel.
    pub fn find_all<P>(&self, patterns: &[P]) -> Vec<Vec<usize>>
    where
        P: AsRef<[u8]> + Sync,
    {
        patterns
            .par_iter()
            .map(|pattern| self.find(pattern.as_ref()))
            .collect()
    }

    /// Returns true if and only if `pattern` occurs in the text.
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.locate(pattern).is_some()
    }

    /// Number of occurrences of `pattern`.
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.find(pattern).len()
    }

    /// Node whose subtree holds the occurrences of `pattern`.
    pub fn locate(&self, pattern: &[u8]) -> Option<NodeId> {
        let ranks = self.alphabet.ranks_of(pattern)?;
        self.tree.locate(self.text(), &ranks)
    }

    /// Suffix starts of every leaf under `node`, in suffix order.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of this index's tree.
    pub fn leaves_under(&self, node: NodeId) -> Vec<usize> {
        self.tree.leaves_under(node)
    }

    /// Paths of node ids leading to every edge labeled exactly `label`.
    pub fn paths_to_label(&self, label: &[u8]) -> Vec<Vec<NodeId>> {
        self.tree.paths_to_label(self.text(), label)
    }

    /// The indented edge-label listing of the suffix tree.
    pub fn render_tree(&self) -> String {
        self.tree.render(self.text())
    }

    /// The terminated text.
    #[inline]
    pub fn text(&self) -> &Text {
        self.table.text()
    }

    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[inline]
    pub fn suffix_table(&self) -> &SuffixTable {
        &self.table
    }

    #[inline]
    pub fn suffix_array(&self) -> &[usize] {
        self.table.table()
    }

    #[inline]
    pub fn lcp_array(&self) -> &[usize] {
        &self.lcp
    }

    #[inline]
    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// Length of the text, terminal included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
