pub mod request_id;
pub mod scheme;

pub use request_id::request_id_middleware;
pub use scheme::{select_auth_header, AuthHeader, AuthScheme};
