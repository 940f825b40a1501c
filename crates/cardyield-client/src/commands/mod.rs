pub mod cards;
pub mod common;
pub mod curve;
pub mod demo;
pub mod rank;
pub mod recommend;
pub mod validate;
