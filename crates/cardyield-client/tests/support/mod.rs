#![allow(dead_code)]

pub mod catalog_testkit;
