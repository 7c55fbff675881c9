//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the API endpoints and the static
//! resolver: MIME detection and response builders.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    apply_cors, build_404_response, build_405_response, build_413_response,
    build_file_response, build_json_response, build_options_response,
};
