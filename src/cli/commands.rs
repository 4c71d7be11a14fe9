use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "videovec", about = "Embedding store for video understanding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store a vector
    Add {
        /// JSON with vector, source_id, vector_type, and optional id, timestamp, metadata
        json: String,
    },
    /// Add every record of a JSON array in one all-or-nothing batch
    AddBatch {
        /// JSON array of objects shaped like `add` input
        json: String,
    },
    /// Fetch a vector and its metadata
    Get { id: String },
    /// Delete a vector (no error if it does not exist)
    Delete { id: String },
    /// Delete every vector derived from a source
    DeleteSource { source_id: String },
    /// Cosine similarity search
    Search {
        /// Query vector as a JSON array
        vector: String,
        #[arg(long, default_value = "10")]
        top_k: usize,
        /// Minimum similarity (defaults to the configured threshold)
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<f64>,
        /// Only match vectors from this source
        #[arg(long)]
        source: Option<String>,
        /// Only match vectors of this type (frame, scene, audio, text, object, ocr)
        #[arg(long = "type")]
        vector_type: Option<String>,
    },
    /// Vectors most similar to a stored one
    Similar {
        id: String,
        #[arg(long, default_value = "10")]
        top_k: usize,
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<f64>,
    },
    /// Remove every vector
    Clear,
    /// Number of stored vectors
    Size,
    /// Show store statistics
    Stats,
    /// Dump the store as a JSON snapshot
    Export,
    /// Load a JSON snapshot file
    Import { path: String },
    /// List available backends
    Backends,
}
