pub use crate::ds::{ChainedHashTable, DuplicateTree, SlotArena, SlotId, TreeNode};
pub use crate::error::{ConfigError, CopyCountError, CopyCountErrorKind, InvariantError};
pub use crate::index::FrequencyIndex;

#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{IndexMetricsSnapshot, TableMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
