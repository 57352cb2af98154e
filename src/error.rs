use thiserror::Error;

/// Raised when the text or the alphabet cannot be indexed. Always reported
/// before any sorting starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("alphabet has no symbols besides the terminal")]
    EmptyAlphabet,

    #[error("symbol {symbol:?} appears more than once in the alphabet")]
    DuplicateSymbol { symbol: char },

    #[error("terminal symbol {terminal:?} must not be listed among the alphabet symbols")]
    TerminalInAlphabet { terminal: char },

    #[error("symbol {symbol:?} at position {position} is not in the alphabet")]
    UnknownSymbol { symbol: char, position: usize },

    #[error("terminal symbol {terminal:?} found at position {position} before the end of the text")]
    TerminalInText { terminal: char, position: usize },

    #[error("terminal must be an ASCII symbol, got {terminal:?}")]
    NonAsciiTerminal { terminal: char },
}
