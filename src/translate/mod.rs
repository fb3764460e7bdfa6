pub mod builder;
pub mod catalog;
pub mod client;
pub mod interface;
pub mod operations;
pub mod pipeline;
pub mod requests;

pub use builder::UpstreamBuilder;
pub use client::TranslatorClient;
pub use interface::{TranslateInterface, UpstreamRequest};
