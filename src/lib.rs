//! Twinlink - Digital Twin Networking Agent
//!
//! This crate implements a "digital twin" conversational persona: given a
//! professional profile, it carries on networking-style conversations,
//! deciding each turn whether to share, ask, advise or rebalance.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
