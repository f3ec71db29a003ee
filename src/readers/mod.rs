pub mod company_reader;

pub use company_reader::{CompanyReader, LoadReport};
