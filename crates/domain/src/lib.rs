#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod document;
mod error;
mod muscle;
mod name;
mod progress;
mod records;
mod selection;
mod service;
mod settings;
mod trend;
mod workout;

pub use catalog::*;
pub use document::*;
pub use error::*;
pub use muscle::*;
pub use name::*;
pub use progress::*;
pub use records::*;
pub use selection::*;
pub use service::*;
pub use settings::*;
pub use trend::*;
pub use workout::*;
