pub mod blog;
pub mod datalab;
pub mod error;
pub mod http;
pub mod provider;
pub mod searchad;
pub mod types;
