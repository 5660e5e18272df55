pub mod mac_tests;
pub mod snapshot_tests;
pub mod determinism_tests;
