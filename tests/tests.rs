extern crate quickcheck;

use quickcheck::{QuickCheck, TestResult, Testable};
use rand::Rng;
use suffixtree::lcp::lcp_array_naive;
use suffixtree::{Alphabet, ConfigurationError, SuffixIndex, SuffixTable, SuffixTree};

fn dna_alphabet() -> Alphabet {
    Alphabet::new(b'$', b"ACGT").unwrap()
}

/// Maps arbitrary bytes onto a small alphabet so that repeats are common.
fn dna(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|&b| b"ACGT"[(b % 4) as usize]).collect()
}

fn index(text: &str) -> SuffixIndex {
    SuffixIndex::new(text.as_bytes()).unwrap()
}

fn dna_index(text: &[u8]) -> SuffixIndex {
    SuffixIndex::build(text, dna_alphabet()).unwrap()
}

fn naive(text: &[u8]) -> SuffixTable {
    SuffixTable::new_naive(dna_alphabet().encode(text).unwrap())
}

fn sorted(mut positions: Vec<usize>) -> Vec<usize> {
    positions.sort();
    positions
}

/// Every `i` such that `text[i..]` starts with `pattern`.
fn scan(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() {
        return Vec::new();
    }
    (0..text.len())
        .filter(|&i| text[i..].starts_with(pattern))
        .collect()
}

fn qc<T: Testable>(f: T) {
    QuickCheck::new().tests(1000).max_tests(10000).quickcheck(f);
}

// These tests assume the correctness of the naive suffix table. (It's only a
// comparison sort and probably difficult to get wrong.)

#[test]
fn basic1() {
    assert_eq!(index("ABABAA").suffix_array(), &[6, 5, 4, 2, 0, 3, 1]);
}

#[test]
fn basic2() {
    let text = b"GATTACAGATTACA";
    assert_eq!(dna_index(text).suffix_array(), naive(text).table());
}

#[test]
fn empty_is_ok() {
    let sa = index("");
    assert_eq!(sa.suffix_array(), &[0]);
    assert!(sa.lcp_array().is_empty());
    assert_eq!(sa.tree().len(), 2);
}

#[test]
fn prop_matches_naive() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        dna_index(&text).suffix_array() == naive(&text).table()
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_is_strictly_sorted_permutation() {
    fn prop(bytes: Vec<u8>) -> bool {
        let index = dna_index(&dna(&bytes));
        let mut seen = index.suffix_array().to_vec();
        seen.sort();
        index.suffix_table().is_sorted() && seen == (0..index.len()).collect::<Vec<_>>()
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_lcp_matches_naive() {
    fn prop(bytes: Vec<u8>) -> bool {
        let index = dna_index(&dna(&bytes));
        index.lcp_array() == &*lcp_array_naive(index.text(), index.suffix_array())
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_find_matches_scan() {
    fn prop(bytes: Vec<u8>, pattern: Vec<u8>) -> TestResult {
        let text = dna(&bytes);
        let pattern = dna(&pattern[..pattern.len().min(4)]);
        let index = dna_index(&text);
        TestResult::from_bool(sorted(index.find(&pattern)) == scan(&text, &pattern))
    }
    qc(prop as fn(Vec<u8>, Vec<u8>) -> TestResult);
}

#[test]
fn prop_find_substrings() {
    fn prop(bytes: Vec<u8>, start: usize, len: usize) -> TestResult {
        let text = dna(&bytes);
        if text.is_empty() {
            return TestResult::discard();
        }
        let start = start % text.len();
        let end = start + 1 + len % (text.len() - start);
        let pattern = &text[start..end];

        let index = dna_index(&text);
        let found = sorted(index.find(pattern));
        TestResult::from_bool(found.contains(&start) && found == scan(&text, pattern))
    }
    qc(prop as fn(Vec<u8>, usize, usize) -> TestResult);
}

#[test]
fn prop_any_symbol_order_matches_naive() {
    fn prop(bytes: Vec<u8>, pattern: Vec<u8>, sigma: u8, shift: usize) -> TestResult {
        let sigma = sigma % 6 + 1;
        let squeeze = |&b: &u8| b'a' + b % sigma;
        let text: Vec<u8> = bytes.iter().map(squeeze).collect();
        if text.is_empty() {
            return TestResult::discard();
        }
        let pattern: Vec<u8> = pattern.iter().take(4).map(squeeze).collect();

        // Byte order, then a reversed and rotated declared order.
        let inferred = Alphabet::inferred(&text, 0).unwrap();
        let mut symbols = inferred.symbols()[1..].to_vec();
        symbols.reverse();
        let len = symbols.len();
        symbols.rotate_left(shift % len);
        let declared = Alphabet::new(0, &symbols).unwrap();

        for alphabet in [inferred, declared] {
            let naive = SuffixTable::new_naive(alphabet.encode(&text).unwrap());
            let index = SuffixIndex::build(&text, alphabet).unwrap();
            if index.suffix_array() != naive.table() {
                return TestResult::failed();
            }
            if sorted(index.find(&pattern)) != scan(&text, &pattern) {
                return TestResult::failed();
            }
        }
        TestResult::passed()
    }
    qc(prop as fn(Vec<u8>, Vec<u8>, u8, usize) -> TestResult);
}

#[test]
fn prop_tree_agrees_with_table() {
    fn prop(bytes: Vec<u8>, pattern: Vec<u8>) -> bool {
        let index = dna_index(&dna(&bytes));
        let pattern = dna(&pattern[..pattern.len().min(3)]);
        let ranks = index.alphabet().ranks_of(&pattern).unwrap();
        index.find(&pattern) == index.suffix_table().positions(&ranks)
    }
    qc(prop as fn(Vec<u8>, Vec<u8>) -> bool);
}

#[test]
fn prop_leaf_paths_spell_suffixes() {
    fn prop(bytes: Vec<u8>) -> bool {
        let index = dna_index(&dna(&bytes));
        let (text, tree) = (index.text(), index.tree());

        let mut leaves = 0;
        for (id, node) in tree.nodes() {
            if let Some(suffix) = node.occurs() {
                leaves += 1;
                let mut label = Vec::new();
                for step in tree.path_to(id) {
                    label.extend_from_slice(tree.edge_label(text, step));
                }
                if label != text.symbols()[suffix..] {
                    return false;
                }
            }
        }
        leaves == text.len()
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_internal_nodes_branch() {
    fn prop(bytes: Vec<u8>) -> bool {
        let index = dna_index(&dna(&bytes));
        let tree = index.tree();
        let ok = tree.nodes().all(|(id, node)| {
            let depth_ok = match node.parent() {
                Some(parent) => {
                    node.string_depth() == tree.node(parent).string_depth() + node.edge().len()
                }
                None => id == tree.root() && node.string_depth() == 0,
            };
            let shape_ok = node.is_leaf() || id == tree.root() || node.num_children() >= 2;
            depth_ok && shape_ok
        });
        ok
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn prop_build_is_deterministic() {
    fn prop(bytes: Vec<u8>) -> bool {
        let text = dna(&bytes);
        let (a, b) = (dna_index(&text), dna_index(&text));
        let table = SuffixTable::new(dna_alphabet().encode(&text).unwrap());
        let rebuilt = SuffixTree::from_suffix_array(table.text(), table.table(), a.lcp_array());
        a.tree() == b.tree() && a.tree() == &rebuilt
    }
    qc(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn random_genome() {
    let mut rng = rand::thread_rng();
    let text: Vec<u8> = (0..5_000).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect();
    let index = dna_index(&text);
    assert!(index.suffix_table().is_sorted());

    for _ in 0..200 {
        let start = rng.gen_range(0..text.len());
        let end = (start + rng.gen_range(1..12)).min(text.len());
        let pattern = &text[start..end];
        assert_eq!(sorted(index.find(pattern)), scan(&text, pattern));
    }
}

#[test]
fn long_run_of_one_symbol() {
    let text = vec![b'A'; 2_000];
    let index = dna_index(&text);
    assert_eq!(index.suffix_array()[0], 2_000);
    assert_eq!(index.count(b"AAAA"), 1_997);
    assert_eq!(index.find(&text), vec![0]);
}

// Do some testing on substring search.

#[test]
fn two_occurrences() {
    let index = index("GTAGT");
    assert_eq!(sorted(index.find(b"GT")), vec![0, 3]);
    assert!(index.find(b"B").is_empty());
}

#[test]
fn overlapping_occurrences() {
    let index = index("AAA");
    assert_eq!(sorted(index.find(b"AA")), vec![0, 1]);
    assert_eq!(index.find(b"AAA"), vec![0]);
}

#[test]
fn one_find_empty() {
    let index = index("A");
    assert!(index.find(b"").is_empty());
    assert!(index.find(b"AA").is_empty());
    assert!(!index.contains(b""));
}

#[test]
fn query_longer() {
    let index = index("AZ");
    assert!(index.find(b"MNOMNOMNOMNOMNOMNOMNO").is_empty());
    assert!(!index.contains(b"MNOMNOMNOMNOMNOMNOMNO"));
}

#[test]
fn terminal_matches_last_suffix_only() {
    let index = index("BANANA");
    assert_eq!(index.find(b"$"), vec![6]);
    assert_eq!(index.find(b"A$"), vec![5]);
}

#[test]
fn many_exists_long() {
    let index = index("ZZZZABCZZZZZABCZZZZZZ");
    assert_eq!(index.find(b"ABC"), vec![4, 12]);
}

#[test]
fn results_follow_suffix_order() {
    let index = index("MISSISSIPPI");
    // "ISSIPPI$" < "ISSISSIPPI$"
    assert_eq!(index.find(b"ISS"), vec![4, 1]);
    assert_eq!(index.find(b"I"), vec![10, 7, 4, 1]);
}

#[test]
fn rejects_text_outside_alphabet() {
    assert_eq!(
        SuffixIndex::new(b"HELLO WORLD").unwrap_err(),
        ConfigurationError::UnknownSymbol {
            symbol: ' ',
            position: 5
        }
    );
    assert_eq!(
        SuffixIndex::new(b"A$B").unwrap_err(),
        ConfigurationError::TerminalInText {
            terminal: '$',
            position: 1
        }
    );
}

#[test]
fn inferred_alphabet_indexes_any_bytes() {
    let text = b"the quick brown fox was very quick.";
    let index = SuffixIndex::build(text, Alphabet::inferred(text, 0).unwrap()).unwrap();
    // " " sorts before "."
    assert_eq!(index.find(b"quick"), vec![4, 29]);
    assert_eq!(index.count(b"o"), 2);
}

#[test]
fn paths_to_label_lead_to_matching_edges() {
    let index = index("ABABAA");
    let paths = index.paths_to_label(b"A$");
    assert!(!paths.is_empty());
    for path in paths {
        let last = *path.last().unwrap();
        assert_eq!(index.tree().edge_label(index.text(), last), b"A$");
        assert_eq!(index.tree().path_to(last), path);
    }
}
