//! Listing collector configuration types.

/// Maximum line length to prevent memory exhaustion.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024 * 1024; // 1 MB

/// What to do with a LIST line that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop and return the error. **Recommended.**
    #[default]
    Abort,
    /// Log a warning, count the line as skipped and keep going.
    Skip,
}

/// Listing collector configuration.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Handling of malformed entries.
    pub on_malformed: MalformedPolicy,
    /// Longest accepted line, terminator excluded.
    pub max_line_length: usize,
    /// Accept a bare LF as line terminator.
    pub relaxed_crlf: bool,
}

impl ListingConfig {
    /// Creates a configuration that aborts on the first malformed entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_malformed: MalformedPolicy::Abort,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            relaxed_crlf: false,
        }
    }

    /// Creates a configuration builder.
    #[must_use]
    pub const fn builder() -> ListingConfigBuilder {
        ListingConfigBuilder::new()
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for listing configuration.
#[derive(Debug, Clone)]
pub struct ListingConfigBuilder {
    on_malformed: MalformedPolicy,
    max_line_length: Option<usize>,
    relaxed_crlf: bool,
}

impl ListingConfigBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            on_malformed: MalformedPolicy::Abort,
            max_line_length: None,
            relaxed_crlf: false,
        }
    }

    /// Sets the malformed-entry policy.
    #[must_use]
    pub const fn on_malformed(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    /// Sets the maximum line length.
    #[must_use]
    pub const fn max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    /// Accepts a bare LF terminator in addition to CRLF.
    #[must_use]
    pub const fn relaxed_crlf(mut self, relaxed: bool) -> Self {
        self.relaxed_crlf = relaxed;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> ListingConfig {
        ListingConfig {
            on_malformed: self.on_malformed,
            max_line_length: self.max_line_length.unwrap_or(DEFAULT_MAX_LINE_LENGTH),
            relaxed_crlf: self.relaxed_crlf,
        }
    }
}

impl Default for ListingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
