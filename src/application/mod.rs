pub mod grid_search;
pub mod inference;
pub mod reporting;
pub mod training;
