mod cooldown_tests;
mod store_tests;
