pub mod status;
pub mod summaries;
