//! Property search: exact lookup and criteria filtering with ranking

pub mod criteria;
pub mod engine;
pub mod lookup;
pub mod ranking;


pub use criteria::SearchCriteria;
pub use engine::SearchEngine;
pub use lookup::find_exact;
