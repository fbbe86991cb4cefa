#![allow(dead_code)]

pub mod builders;
pub mod mock_actions;
pub mod strategies;

pub use builders::*;
pub use mock_actions::*;
pub use strategies::*;
