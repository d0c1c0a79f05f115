pub mod build_tools;
pub mod error_codes;
pub mod server;
pub mod simulator_tools;
pub mod test_run_tools;
