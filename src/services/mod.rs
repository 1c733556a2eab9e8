pub mod catalog;
pub mod recommendation;
pub mod serving;
pub mod training;
