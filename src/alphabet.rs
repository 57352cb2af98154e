use std::fmt;
use std::ops::Range;

use crate::error::ConfigurationError;
use crate::util::{par_bincount, prefix_sums};

/// Terminal symbol used by [`Alphabet::default`].
pub const DEFAULT_TERMINAL: u8 = b'$';

/// A fixed, totally ordered set of byte symbols. The terminal always has
/// rank 0; the remaining symbols are ranked in the order they were declared.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Box<[u8]>,
    ranks: Box<[Option<u8>; 256]>,
}

impl Alphabet {
    /// Creates an alphabet from a terminal and the remaining symbols, smallest
    /// first.
    pub fn new(terminal: u8, symbols: &[u8]) -> Result<Self, ConfigurationError> {
        if symbols.is_empty() {
            return Err(ConfigurationError::EmptyAlphabet);
        }
        if symbols.contains(&terminal) {
            return Err(ConfigurationError::TerminalInAlphabet {
                terminal: terminal as char,
            });
        }
        Self::from_ordered(terminal, symbols)
    }

    /// Creates an alphabet of `terminal` followed by `A`..=`Z`.
    pub fn uppercase(terminal: u8) -> Result<Self, ConfigurationError> {
        let letters: Vec<u8> = (b'A'..=b'Z').collect();
        Self::new(terminal, &letters)
    }

    /// Creates an alphabet holding the distinct symbols of `text` in
    /// ascending byte order. The terminal is skipped if the text contains it,
    /// leaving [`Alphabet::encode`] to reject the text.
    pub fn inferred(text: &[u8], terminal: u8) -> Result<Self, ConfigurationError> {
        let mut seen = [false; 256];
        for &symbol in text {
            seen[symbol as usize] = true;
        }
        seen[terminal as usize] = false;

        let symbols: Vec<u8> = (0..=u8::MAX).filter(|&s| seen[s as usize]).collect();
        Self::from_ordered(terminal, &symbols)
    }

    /// Converts a terminal given as a `char` (a command-line flag or a Python
    /// argument) into the byte stored in the text.
    pub fn terminal_symbol(terminal: char) -> Result<u8, ConfigurationError> {
        u8::try_from(terminal)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ConfigurationError::NonAsciiTerminal { terminal })
    }

    fn from_ordered(terminal: u8, symbols: &[u8]) -> Result<Self, ConfigurationError> {
        let mut ranks = Box::new([None; 256]);
        let mut ordered = Vec::with_capacity(symbols.len() + 1);
        ordered.push(terminal);
        ranks[terminal as usize] = Some(0);

        // At most 256 distinct bytes exist, so every rank fits in a u8.
        for &symbol in symbols {
            if ranks[symbol as usize].is_some() {
                return Err(ConfigurationError::DuplicateSymbol {
                    symbol: symbol as char,
                });
            }
            ranks[symbol as usize] = Some(ordered.len() as u8);
            ordered.push(symbol);
        }

        Ok(Alphabet {
            symbols: ordered.into_boxed_slice(),
            ranks,
        })
    }

    /// Returns the terminal symbol.
    #[inline]
    pub fn terminal(&self) -> u8 {
        self.symbols[0]
    }

    /// Returns the number of symbols, terminal included.
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// An alphabet always holds at least its terminal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the rank of `symbol`, or `None` if it is not in the alphabet.
    #[inline]
    pub fn rank(&self, symbol: u8) -> Option<u8> {
        self.ranks[symbol as usize]
    }

    /// Returns the symbol with the given rank.
    #[inline]
    pub fn symbol(&self, rank: u8) -> u8 {
        self.symbols[rank as usize]
    }

    /// All symbols in rank order, terminal first.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Translates a pattern into ranks. Returns `None` when the pattern holds
    /// a symbol outside the alphabet, since such a pattern cannot occur.
    pub fn ranks_of(&self, pattern: &[u8]) -> Option<Vec<u8>> {
        pattern.iter().map(|&symbol| self.rank(symbol)).collect()
    }

    /// Validates `src` and appends the terminal.
    ///
    /// Every symbol is checked before anything is allocated for sorting.
    pub fn encode(&self, src: &[u8]) -> Result<Text, ConfigurationError> {
        let terminal = self.terminal();
        let mut ranks = Vec::with_capacity(src.len() + 1);
        for (position, &symbol) in src.iter().enumerate() {
            if symbol == terminal {
                return Err(ConfigurationError::TerminalInText {
                    terminal: terminal as char,
                    position,
                });
            }
            match self.rank(symbol) {
                Some(rank) => ranks.push(rank),
                None => {
                    return Err(ConfigurationError::UnknownSymbol {
                        symbol: symbol as char,
                        position,
                    })
                }
            }
        }
        ranks.push(0);

        let mut symbols = Vec::with_capacity(src.len() + 1);
        symbols.extend_from_slice(src);
        symbols.push(terminal);

        Ok(Text {
            symbols: symbols.into_boxed_slice(),
            ranks: ranks.into_boxed_slice(),
            sigma: self.len(),
        })
    }
}

impl Default for Alphabet {
    /// The terminal `$` followed by the upper-case letters `A`..=`Z`.
    fn default() -> Self {
        match Self::uppercase(DEFAULT_TERMINAL) {
            Ok(alphabet) => alphabet,
            Err(e) => unreachable!("default alphabet is valid: {e}"),
        }
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Alphabet({:?})", String::from_utf8_lossy(&self.symbols))
    }
}

/// A validated, terminated text. Holds the raw symbols for display and the
/// alphabet ranks every ordering decision is made on.
#[derive(Clone, PartialEq, Eq)]
pub struct Text {
    symbols: Box<[u8]>,
    ranks: Box<[u8]>,
    sigma: usize,
}

impl Text {
    /// Length including the terminal, so never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Size of the alphabet the text was encoded with.
    #[inline]
    pub fn sigma(&self) -> usize {
        self.sigma
    }

    /// Raw symbols, terminal included.
    #[inline]
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Alphabet ranks of every position, terminal (rank 0) included.
    #[inline]
    pub fn ranks(&self) -> &[u8] {
        &self.ranks
    }

    /// Ranks of the suffix starting at `i`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &[u8] {
        &self.ranks[i..]
    }

    /// Lossy UTF-8 rendering of a slice of the text.
    pub fn slice_to_string(&self, range: Range<usize>) -> String {
        String::from_utf8_lossy(&self.symbols[range]).into_owned()
    }

    /// Counting sort of the positions by symbol: `order[k]` is the position
    /// holding the k-th smallest symbol, ties broken by position.
    pub fn sort_characters(&self) -> Vec<usize> {
        let mut count = par_bincount(&self.ranks[..], self.sigma);
        prefix_sums(&mut count);

        // Scanning right-to-left with pre-decrement keeps equal symbols in
        // ascending position order.
        let mut order = vec![0; self.len()];
        for i in (0..self.len()).rev() {
            let c = self.ranks[i] as usize;
            count[c] -= 1;
            order[count[c]] = i;
        }
        order
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Text({:?})", String::from_utf8_lossy(&self.symbols))
    }
}
