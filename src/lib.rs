pub mod error;
pub mod metadata;
pub mod process;
pub mod run;
pub mod schema;

pub use error::{Error, ParseError, Result, SchemaError, TemplateError};
pub use run::{run, Config, RunSummary};
