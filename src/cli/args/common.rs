//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - progress and results as plain text (default)
    #[default]
    Pretty,
    /// JSON format - result document on stdout, progress on stderr
    Json,
}
