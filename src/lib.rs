// blogfresh: editorial freshness scoring for blog article exports.
//
// This is the library root. The classification pipeline (classify, scoring,
// pipeline) is pure and synchronous; db and output belong to the
// presentation layer that sits on top of it.

pub mod articles;
pub mod classify;
pub mod config;
pub mod db;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
