use log::{debug, trace};
use rayon::prelude::*;
use std::fmt;
use std::time::Instant;

use crate::alphabet::Text;
use crate::util::{par_bincount, prefix_sums};

/// A suffix table is a sequence of lexicographically sorted suffixes.
///
/// Suffixes are compared by alphabet rank, so the table follows the declared
/// symbol order rather than byte order.
#[derive(Clone, PartialEq, Eq)]
pub struct SuffixTable {
    text: Text,
    table: Box<[usize]>,
}

impl SuffixTable {
    /// Creates a new suffix table for `text` in `O(n log n)` time and `O(n)`
    /// space by prefix doubling.
    ///
    /// Every round sorts the cyclic rotations by their first `2L` symbols,
    /// reusing the order and equivalence classes of the previous round. The
    /// unique, minimal terminal makes rotation order and suffix order agree.
    pub fn new(text: Text) -> Self {
        let start = Instant::now();
        let n = text.len();

        let mut order = text.sort_characters();
        let mut classes = compute_character_classes(&text, &order);
        let mut num_classes = classes[order[n - 1]] + 1;

        let mut width = 1;
        while width < n && num_classes < n {
            order = sort_doubled(width, &order, &classes, num_classes);
            classes = update_classes(&order, &classes, width);
            num_classes = classes[order[n - 1]] + 1;
            trace!("window {}: {} classes over {} rotations", width * 2, num_classes, n);
            width *= 2;
        }

        debug!("Sorted {} suffixes in {:?}", n, start.elapsed());
        SuffixTable {
            text,
            table: order.into(),
        }
    }

    /// Sorts the suffixes with a plain comparison sort. Slow, but simple
    /// enough to trust as a reference.
    pub fn new_naive(text: Text) -> Self {
        let mut table: Vec<usize> = (0..text.len()).collect();
        table.sort_by(|&a, &b| text.suffix(a).cmp(text.suffix(b)));
        SuffixTable {
            text,
            table: table.into(),
        }
    }

    pub fn from_parts(text: Text, table: Box<[usize]>) -> Self {
        SuffixTable { text, table }
    }

    /// Consumes the suffix table and returns the underlying text and table.
    pub fn into_parts(self) -> (Text, Box<[usize]>) {
        (self.text, self.table)
    }

    /// Returns the text this table was built over.
    #[inline]
    pub fn text(&self) -> &Text {
        &self.text
    }

    /// Returns the suffix array.
    #[inline]
    pub fn table(&self) -> &[usize] {
        &self.table
    }

    /// Returns the number of suffixes in the table.
    ///
    /// Alternatively, this is the number of symbols in the text, terminal
    /// included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` iff `self.len() == 0`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the suffix table is strictly sorted. This is always true for
    /// valid suffix tables.
    pub fn is_sorted(&self) -> bool {
        self.table
            .par_windows(2)
            .all(|pair| self.text.suffix(pair[0]) < self.text.suffix(pair[1]))
    }

    /// Returns the ranks of the suffix at index `i`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &[u8] {
        self.text.suffix(self.table[i])
    }

    /// Returns true if and only if `query` (given as ranks) is in text.
    ///
    /// This runs in `O(mlogn)` time, where `m == query.len()` and
    /// `n == self.len()`.
    pub fn contains(&self, query: &[u8]) -> bool {
        !query.is_empty()
            && self
                .table
                .binary_search_by(|&sufi| {
                    self.text
                        .suffix(sufi)
                        .iter()
                        .take(query.len())
                        .cmp(query.iter())
                })
                .is_ok()
    }

    /// Returns the positions where `query` (given as ranks) starts in the
    /// text, in suffix order.
    ///
    /// This runs in `O(mlogn)` time. An empty query matches nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use suffixtree::{Alphabet, SuffixTable};
    ///
    /// let alphabet = Alphabet::default();
    /// let sa = SuffixTable::new(alphabet.encode(b"ABABAA").unwrap());
    /// let query = alphabet.ranks_of(b"AB").unwrap();
    /// assert_eq!(sa.positions(&query), &[2, 0]);
    /// ```
    pub fn positions(&self, query: &[u8]) -> &[usize] {
        if query.is_empty() {
            return &[];
        }

        // Find the first suffix that is not smaller than the query, then the
        // first one after it that no longer starts with the query.
        let start = binary_search(&self.table, |&sufi| query <= self.text.suffix(sufi));
        let end = start
            + binary_search(&self.table[start..], |&sufi| {
                !self.text.suffix(sufi).starts_with(query)
            });
        &self.table[start..end]
    }
}

impl fmt::Debug for SuffixTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n-----------------------------------------")?;
        writeln!(f, "SUFFIX TABLE")?;
        for (rank, &sufstart) in self.table.iter().enumerate() {
            writeln!(
                f,
                "suffix[{}] {} {}",
                rank,
                sufstart,
                self.text.slice_to_string(sufstart..self.text.len())
            )?;
        }
        writeln!(f, "-----------------------------------------")
    }
}

/// Initial equivalence classes: positions holding equal symbols share a
/// class, and class ids follow symbol order starting at 0.
fn compute_character_classes(text: &Text, order: &[usize]) -> Vec<usize> {
    let ranks = text.ranks();
    let mut classes = vec![0; order.len()];
    for i in 1..order.len() {
        let (cur, prev) = (order[i], order[i - 1]);
        classes[cur] = if ranks[cur] != ranks[prev] {
            classes[prev] + 1
        } else {
            classes[prev]
        };
    }
    classes
}

/// Sorts the rotations of length `2 * width` by their first half.
///
/// `order` already sorts the rotations by their first `width` symbols, which
/// are the second half of the rotations starting `width` positions earlier.
/// A stable counting sort by the class of the first half completes the order.
fn sort_doubled(width: usize, order: &[usize], classes: &[usize], num_classes: usize) -> Vec<usize> {
    let n = order.len();
    let mut count = par_bincount(classes, num_classes);
    prefix_sums(&mut count);

    let mut new_order = vec![0; n];
    for &pos in order.iter().rev() {
        let start = (pos + n - width) % n;
        let cl = classes[start];
        count[cl] -= 1;
        new_order[count[cl]] = start;
    }
    new_order
}

/// Recomputes classes for rotations of length `2 * width` over `order`: two
/// rotations share a class iff both of their halves do.
fn update_classes(order: &[usize], classes: &[usize], width: usize) -> Vec<usize> {
    let n = order.len();
    let mut new_classes = vec![0; n];
    for i in 1..n {
        let (cur, prev) = (order[i], order[i - 1]);
        let (cur_mid, prev_mid) = ((cur + width) % n, (prev + width) % n);
        new_classes[cur] = if classes[cur] != classes[prev] || classes[cur_mid] != classes[prev_mid] {
            new_classes[prev] + 1
        } else {
            new_classes[prev]
        };
    }
    new_classes
}

/// Binary search to find first element such that `pred(T) == true`.
///
/// Assumes that if `pred(xs[i]) == true` then `pred(xs[i+1]) == true`.
///
/// If all elements yield `pred(T) == false`, then `xs.len()` is returned.
fn binary_search<T, F>(xs: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let (mut left, mut right) = (0, xs.len());
    while left < right {
        let mid = (left + right) / 2;
        if pred(&xs[mid]) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}
