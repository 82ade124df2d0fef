pub mod io_struct;
pub mod prompt;
pub mod relay_state;
pub mod server;
