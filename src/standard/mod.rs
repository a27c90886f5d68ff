//! Blocking implementation over [`std::io::Read`] + [`std::io::Write`] connections.
pub mod bus;
pub mod delay;
pub mod seesaw;
