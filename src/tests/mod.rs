mod sink_tests;
mod utils;
