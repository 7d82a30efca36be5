//! Business logic layer

pub mod auth;
pub mod comments;
pub mod payments;
pub mod posts;
pub mod users;

pub use auth::AuthService;
pub use comments::CommentService;
pub use payments::{CardDetails, ChargeError, ChargeGateway, ChargeReceipt, UnconfiguredGateway};
pub use posts::PostService;
pub use users::UserService;
