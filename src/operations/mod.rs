pub mod report;
pub mod split;
