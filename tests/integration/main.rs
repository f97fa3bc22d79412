//! Integration tests driving the full router over the in-memory store.

mod admin_test;
mod auth_test;
mod bulk_test;
mod helpers;
