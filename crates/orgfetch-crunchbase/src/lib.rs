pub mod client;
pub mod error;
pub mod extract;
pub mod json_path;
pub(crate) mod retry;

pub use client::{CrunchbaseClient, RetryPolicy};
pub use error::{CrunchbaseError, ExtractError};
pub use extract::extract_company_record;
pub use json_path::JsonPath;
