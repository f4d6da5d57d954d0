pub mod http_api;

pub use http_api::HttpConversionApi;
