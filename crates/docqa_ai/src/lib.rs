pub mod answer;
pub mod embed;
pub mod eval;
pub mod ingest;
pub mod provider;
pub mod similarity;
pub mod store;
pub mod synth;
