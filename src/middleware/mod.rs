pub mod auth;

pub use auth::{AuthUser, USER_ID_HEADER};
