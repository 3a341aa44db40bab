pub mod log_buffer;
