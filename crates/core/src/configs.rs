//! Configuration files read by the driver

pub mod build_file;
