pub mod middleware;
pub mod request_id;

pub use middleware::{identity_middleware, AuthUser};
pub use request_id::{request_id_middleware, RequestId};
