//! Bearer-token primitives.
//!
//! Tokens are issued by the external identity provider; this service only
//! validates them. See [`jwt`].

pub mod jwt;
