//! Workspace-level integration tests for runway. See `tests/`.
