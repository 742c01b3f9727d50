//! Login verification
//!
//! The item processor delegates the actual credential check to a
//! [`LoginPolicy`]. The simulated policy produces randomised stand-in
//! outcomes; the remote policy asks an HTTP verification endpoint.

mod policy;
mod remote;
mod simulated;

pub use policy::{LoginOutcome, LoginPolicy, build_policy};
pub use remote::RemoteLoginPolicy;
pub use simulated::SimulatedPolicy;
