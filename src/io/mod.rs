/// CSV export of history and tick summaries.
pub mod export;
