pub mod summary;
pub mod task;
pub mod week;
