//! Programming tutor: LLM-drafted lessons, local code execution for Python,
//! JavaScript, Java and C++, and LLM feedback on submitted code.

pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod handlers;
pub mod llm;
pub mod printer;
pub mod process;
pub mod role;
pub mod tutor;
pub mod utils;

pub use error::{TutorError, TutorResult};
