//! Request and response DTOs.

pub mod request;
pub mod response;

pub use request::{ChangeStatusRequest, CreateBidRequest, WatchRequest};
pub use response::ApiResponse;
