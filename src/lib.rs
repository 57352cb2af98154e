pub mod alphabet;
pub mod error;
pub mod index;
pub mod lcp;
pub mod loader;
pub mod table;
pub mod tree;
pub mod util;

pub use alphabet::{Alphabet, Text};
pub use error::ConfigurationError;
pub use index::SuffixIndex;
pub use table::SuffixTable;
pub use tree::{Node, NodeId, SuffixTree};

/// Python bindings
#[cfg(feature = "python")]
mod bindings;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn suffixtree(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<bindings::PySuffixIndex>()?;
    Ok(())
}
