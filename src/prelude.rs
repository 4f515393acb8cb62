pub use crate::Result;
pub use crate::api::{Method, Rq, Rs, UNKNOWN_STATUS, execute, execute_with};
pub use crate::config::Config;
pub use crate::error::{ConfigError, MethodError, RequestFailure};
pub use crate::eventbrite::{EventDraft, Eventbrite, Moment};
pub use crate::printer::{process_response, write_response};
pub use crate::transport::{ReqwestTransport, Transport};
