pub mod types;

pub use types::{Classification, DocumentClass, FinalResponse};
