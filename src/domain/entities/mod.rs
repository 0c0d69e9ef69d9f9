pub mod document;
pub mod group;
pub mod plan;
pub mod sheet;
