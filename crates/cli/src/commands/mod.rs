pub mod configure;
pub mod list;
pub mod options;
pub mod schema;
