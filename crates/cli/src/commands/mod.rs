pub mod estimate;
pub mod upload;
