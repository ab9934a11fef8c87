pub mod aggregate;
pub mod event;
pub mod fetch;
pub mod metrics;
pub mod output;
pub mod parser;
pub mod report;
pub mod utility;
