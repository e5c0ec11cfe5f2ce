use thiserror::Error;

/// Pipeline stage that failed to parse its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Optimize,
    Reroot,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Optimize => write!(f, "optimize"),
            Stage::Reroot => write!(f, "reroot"),
        }
    }
}

#[derive(Error, Debug)]
pub enum IconError {
    #[error("Failed to parse SVG ({stage} stage): {source}")]
    Parse {
        stage: Stage,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Unexpected SVG structure: {0}")]
    RootShape(&'static str),

    #[error("Failed to decode SVG for \"{0}\" - result is empty")]
    EmptyDocument(String),

    #[error("Invalid attribute pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IconError>;
