pub mod config_io;
pub mod logging;
pub mod note_io;
pub mod storage;
