//! Scenario and adversarial test suite for the Tulip auction engine.
//!
//! Integration tests live in `tests/`; shared fixtures in [`helpers`].

pub mod helpers;
