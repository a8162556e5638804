pub mod bucket;
pub mod poll;
