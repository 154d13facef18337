//! Interactive chat session for the `ewog chat` command.

pub mod banner;
pub mod input;
pub mod loop_runner;

pub use loop_runner::run_chat_loop;
