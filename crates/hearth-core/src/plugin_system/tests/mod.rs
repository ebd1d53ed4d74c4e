mod support;

pub mod version_tests;
