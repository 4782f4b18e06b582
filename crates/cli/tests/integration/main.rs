mod build_tests;
mod common;
mod manifest_tests;
