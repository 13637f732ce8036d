pub use crate::builder::WTinyLfuBuilder;
pub use crate::ds::{FrequencySketch, SlotArena, SlotId};
pub use crate::error::ConfigError;
pub use crate::metrics::WTinyLfuMetricsSnapshot;
pub use crate::policy::wtinylfu::{ConcurrentWTinyLfuCache, WTinyLfuCache};
pub use crate::traits::{CoreCache, MutableCache, ReadOnlyCache};
