//! Typed async client for the employee façade HTTP API.

pub mod client;

pub use client::{ClientError, Employee, EmployeeClient, ErrorBody};
