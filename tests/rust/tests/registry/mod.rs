//! Registry client integration tests

mod catalog;
