//! HTTP service layer for the LoadedRest web-service protocol.
//!
//! This crate exposes a web-service function registry over HTTP, providing:
//!
//! - **Request**: Extracts `wsformat`, `wstoken` and `wsfunction` from the
//!   query string and form bodies
//! - **Handler trait**: Defines the boundary between HTTP and the functions
//! - **Service**: Hyper `Service` implementation for the protocol
//! - **Response helpers**: Format-driven success/error responses

pub mod body;
pub mod dispatch;
pub mod request;
pub mod response;
pub mod service;

pub use body::LoadedRestBody;
pub use dispatch::{
    CallFuture, FunctionHandler, FunctionResult, NotImplementedHandler, WebServiceCall,
};
pub use service::{LoadedRestHttpConfig, LoadedRestHttpService};
