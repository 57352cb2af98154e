use log::debug;
use std::time::Instant;

use crate::alphabet::Text;

/// Maps each text position to its index in the suffix array.
pub fn inverse_suffix_array(table: &[usize]) -> Vec<usize> {
    let mut rank = vec![0; table.len()];
    for (i, &sufi) in table.iter().enumerate() {
        rank[sufi] = i;
    }
    rank
}

/// Computes the LCP array in `O(n)` (Kasai et al.).
///
/// `lcp[i]` is the length of the longest common prefix of the suffixes at
/// `table[i]` and `table[i + 1]`, so the result has `n - 1` entries.
///
/// Positions are visited in text order. If the suffix at `p` shares `h`
/// symbols with its successor in the table, the suffix at `p + 1` shares at
/// least `h - 1` with its own successor, so matching resumes from there.
pub fn lcp_array(text: &Text, table: &[usize]) -> Box<[usize]> {
    let start = Instant::now();
    let n = table.len();
    let ranks = text.ranks();
    let rank = inverse_suffix_array(table);

    let mut lcp = vec![0; n.saturating_sub(1)];
    let mut h: usize = 0;
    for pos in 0..n {
        let r = rank[pos];
        if r == n - 1 {
            h = 0;
            continue;
        }

        let next = table[r + 1];
        while pos + h < n && next + h < n && ranks[pos + h] == ranks[next + h] {
            h += 1;
        }
        lcp[r] = h;
        h = h.saturating_sub(1);
    }

    debug!("Computed {} LCP values in {:?}", lcp.len(), start.elapsed());
    lcp.into_boxed_slice()
}

/// Brute-force LCP array, comparing every adjacent pair from scratch.
pub fn lcp_array_naive(text: &Text, table: &[usize]) -> Box<[usize]> {
    table
        .windows(2)
        .map(|pair| {
            text.suffix(pair[0])
                .iter()
                .zip(text.suffix(pair[1]))
                .take_while(|(a, b)| a == b)
                .count()
        })
        .collect()
}
