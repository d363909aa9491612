pub mod auth_retry;
pub mod navigation;
pub mod transport;

pub use auth_retry::{AuthenticatedClient, CredentialRefresher};
pub use navigation::{routes, Navigator, RouteLog};
pub use transport::{ApiRequest, ApiResponse, FileUpload, HttpTransport, Method, RequestBody, ReqwestTransport};
