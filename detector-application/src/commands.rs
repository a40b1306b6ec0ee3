pub mod detect_commands;
pub mod request_commands;
