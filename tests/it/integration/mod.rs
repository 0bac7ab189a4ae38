//! Integration tests for Chartify.
//!
//! These tests run complete workflows: loading a file, configuring a chart
//! through the reducer, and moving the result through a share link.

mod share_workflow_tests;
