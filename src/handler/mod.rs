// Request handler module entry point
// Routing dispatch and static asset resolution

pub mod router;
pub mod static_files;

pub use router::handle_request;
