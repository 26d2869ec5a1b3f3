pub mod completion;
pub mod defaults;
pub mod init;
pub mod map;
