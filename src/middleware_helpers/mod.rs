pub mod auth_context;
pub mod request_id;

pub use auth_context::MaybeUser;
pub use request_id::{request_id_layers, REQUEST_ID_HEADER};
