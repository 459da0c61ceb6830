pub mod admin;
pub mod health;
pub mod impression;

pub use admin::AdminController;
pub use impression::ImpressionController;
