pub mod error;
pub mod preview;
pub mod reader;
pub mod schema;
pub mod writer;

pub use error::StoreError;
pub use preview::render_preview;
pub use reader::read_company_records;
pub use schema::{company_schema, record_batch};
pub use writer::write_company_record;
