pub mod check;
pub mod dynamic;
pub mod init;
pub mod merge;
pub mod references;
pub mod remove;
pub mod reports;
pub mod translate;
