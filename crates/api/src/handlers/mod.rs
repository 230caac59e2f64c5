pub mod estimation;
pub mod upload;
