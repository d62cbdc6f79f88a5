//! Configuration types for SQL rendering.

/// How bound parameters appear in the rendered text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// `?` for every parameter
    #[default]
    Question,
    /// `$1`, `$2`, ... numbered from one
    Dollar,
}

/// Configuration for SQL rendering.
#[derive(Clone, Debug)]
pub struct SqlConfig {
    /// Parameter placeholder style
    pub(crate) placeholder: Placeholder,
    /// Wrap table and column names in double quotes
    pub(crate) quote_identifiers: bool,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            placeholder: Placeholder::default(),
            quote_identifiers: true,
        }
    }
}

impl SqlConfig {
    /// Create a new SqlConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parameter placeholder style.
    pub fn placeholder(mut self, value: Placeholder) -> Self {
        self.placeholder = value;
        self
    }

    /// Set whether identifiers are quoted.
    pub fn quote_identifiers(mut self, value: bool) -> Self {
        self.quote_identifiers = value;
        self
    }
}
