pub mod id;
pub mod jwt;
pub mod parameter_error_handler;
pub mod time;
pub mod validate;

pub use id::generate_id;
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use validate::Validate;
