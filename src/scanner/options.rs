/// Configuration options for environment scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Descend into hidden directories (names starting with .)
    pub include_hidden: bool,
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to descend into hidden directories
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }
}
