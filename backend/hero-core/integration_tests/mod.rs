mod error;
mod helpers;
mod marvel_client;
mod pipeline;
