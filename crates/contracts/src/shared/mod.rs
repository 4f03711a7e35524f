pub mod api_response;
pub mod reference;
pub mod token;

pub use api_response::{ApiError, ApiResponse};
pub use reference::ReferenceItem;
pub use token::{TokenPresentation, TokenTone};
