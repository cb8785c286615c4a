//! Executor behavior tests
