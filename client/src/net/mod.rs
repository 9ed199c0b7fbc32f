//! Browser networking.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the only module that touches `fetch`; everything above the
//! wire (refresh-retry, session, pagination) comes from `portal`.

pub mod transport;
