//! Integration tests for configuration resolution and project resource sync

mod resolver_scenarios;
mod test_utils;
