pub mod batch;
pub mod init;
pub mod run;
pub mod validate;
