pub mod excuses;
pub mod init;
pub mod page;
