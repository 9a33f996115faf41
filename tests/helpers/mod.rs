//! Test helpers module
//!
//! Fakes for the relay transport and attachment resolver, plus builders
//! that assemble a conversation engine around them.

#![allow(dead_code)]

pub mod fakes;
pub mod wizard;

pub use fakes::*;
pub use wizard::*;
