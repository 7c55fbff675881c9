// API module entry point
// Fixed JSON/image endpoints under /api

mod handlers;

pub use handlers::{hello, hello_image, HELLO_BODY};
