//! Shared utilities for git-cleanup integration tests
//!
//! Tests run the real binary against throwaway repositories: a bare "remote" plus a
//! clone of it that plays the role of a managed area.

pub mod assertions;
pub mod repository;
