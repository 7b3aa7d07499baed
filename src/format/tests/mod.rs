//! Tests for label file reading and writing against a real filesystem.

mod roundtrip_tests;
