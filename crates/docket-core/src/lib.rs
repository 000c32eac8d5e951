pub mod merge;
pub mod normalize;
pub mod record;

pub use merge::merge;
pub use normalize::{NormalizeError, normalize_case_number, normalize_date};
pub use record::{CaseRecord, IpItem, Party, RecordedEntry, RelatedCase};
