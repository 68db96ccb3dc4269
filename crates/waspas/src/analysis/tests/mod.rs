mod common;
mod routing;
mod scoring;
mod sweep;
