pub mod api;

pub use api::api_scope;
