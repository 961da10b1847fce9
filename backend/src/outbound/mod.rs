//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process worker and support request stores with demo seed
//!   data, standing in for a remote backend.
//! - **admin_directory**: the fixed set of seeded administrator accounts.
//! - **sms**: OTP "delivery" that only logs the code.
//! - **latency**: artificial network delay applied before every Mock API call.
//!
//! Adapters are thin translators between domain types and their storage; they
//! contain no business logic.

pub mod admin_directory;
pub mod latency;
pub mod memory;
pub mod sms;
