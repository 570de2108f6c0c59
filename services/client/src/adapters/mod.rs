pub mod chat_api;
pub mod http;
pub mod pdf_api;
pub mod plan_api;
pub mod protocol;

pub use chat_api::HttpChatAdapter;
pub use http::ServiceClient;
pub use pdf_api::HttpPdfAdapter;
pub use plan_api::HttpPlanAdapter;
