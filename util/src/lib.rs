pub mod config;
pub mod object_id;
pub mod paths;
pub mod state;
pub mod test_helpers;
