//! `campusconnect-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. It is the
//! single source of truth for "who can claim to be whom" (credentials,
//! tokens, the demo directory) and for "who may do what" (the policy table).

pub mod credentials;
pub mod demo;
pub mod policy;
pub mod token;

pub use credentials::{hash_password, verify_password};
pub use demo::{DemoAccount, DemoDirectory};
pub use policy::{
    Action, PolicyError, ResourceKind, Rule, authorize, guard_creator_leave, guard_self_deactivate,
    guard_self_delete, rule_for,
};
pub use token::{TOKEN_TTL_SECS, TokenError, TokenService};

pub use campusconnect_core::{Identity, Role};
