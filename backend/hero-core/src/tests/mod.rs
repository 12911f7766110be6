mod executor;
mod logger;
mod support;
