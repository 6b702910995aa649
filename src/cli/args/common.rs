//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - progress lines and a summary banner
    #[default]
    Pretty,
    /// Table format - one row per check
    Table,
    /// JSON format - structured for scripts and CI
    Json,
}
