pub mod data;
pub mod domain;
pub mod series;

pub use data::*;
pub use domain::*;
pub use series::*;
