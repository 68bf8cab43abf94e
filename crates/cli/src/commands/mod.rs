pub mod describe;
pub mod init;
pub mod translate;

pub use describe::describe_command;
pub use init::init_command;
pub use translate::translate_command;
