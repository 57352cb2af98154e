use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::alphabet::Alphabet;
use crate::error::ConfigurationError;
use crate::index::SuffixIndex;

impl From<ConfigurationError> for PyErr {
    fn from(err: ConfigurationError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// A suffix tree index over a single text.
#[pyclass(name = "SuffixIndex")]
pub struct PySuffixIndex {
    index: SuffixIndex,
}

#[pymethods]
impl PySuffixIndex {
    #[new]
    #[pyo3(signature = (text, alphabet=None, terminal='$'))]
    pub fn new_py(text: &str, alphabet: Option<&str>, terminal: char) -> PyResult<Self> {
        let terminal = Alphabet::terminal_symbol(terminal)?;
        let alphabet = match alphabet {
            Some(symbols) => Alphabet::new(terminal, symbols.as_bytes())?,
            None => Alphabet::uppercase(terminal)?,
        };

        Ok(PySuffixIndex {
            index: SuffixIndex::build(text.as_bytes(), alphabet)?,
        })
    }

    pub fn find(&self, pattern: &str) -> Vec<usize> {
        self.index.find(pattern.as_bytes())
    }

    pub fn find_all(&self, patterns: Vec<String>) -> Vec<Vec<usize>> {
        self.index.find_all(&patterns[..])
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.index.contains(pattern.as_bytes())
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.index.count(pattern.as_bytes())
    }

    pub fn suffix_array(&self) -> Vec<usize> {
        self.index.suffix_array().to_vec()
    }

    pub fn lcp_array(&self) -> Vec<usize> {
        self.index.lcp_array().to_vec()
    }

    /// Returns the tree as one edge label per line, indented by depth.
    pub fn render_tree(&self) -> String {
        self.index.render_tree()
    }

    pub fn __len__(&self) -> usize {
        self.index.len()
    }
}
