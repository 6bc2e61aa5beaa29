//! Analytics engine: pure transformations from a session snapshot to the
//! derived series, summaries and rankings. Nothing here touches the store.

pub mod classifier;
pub mod downsample;
pub mod ranking;
pub mod summary;
pub mod timeseries;
pub mod weekly;
