pub mod init;
pub mod localize;
