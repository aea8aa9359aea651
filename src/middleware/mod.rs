pub mod existing;
pub mod payload;
pub mod response;

pub use existing::Existing;
pub use payload::Payload;
pub use response::{ApiResponse, ApiResult};
