pub mod build;
pub mod feed;
pub mod init;
pub mod patch;
pub mod postbuild;
pub mod tags;
