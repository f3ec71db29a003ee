pub mod company;
pub mod criteria;
pub mod place;

pub use company::CompanyRecord;
pub use criteria::{CustomerFilter, FilterCriteria};
pub use place::PlaceKey;
