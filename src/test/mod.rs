//! Declarations and shapes shared by the unit tests.
