#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod document;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
