// Scoring: freshness tiers for classified articles.

pub mod freshness;
