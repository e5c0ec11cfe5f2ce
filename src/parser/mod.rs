pub mod document;
pub mod serialize;

// Re-export commonly used items
pub use document::parse_document;
pub use serialize::serialize_document;
