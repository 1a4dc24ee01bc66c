//! uniqip: memory-efficient distinct IPv4 address counting.
//!
//! Counts the distinct dotted-quad addresses in a newline-delimited file
//! without materializing them in a hash table: membership lives in a dense
//! 2^32-bit bitmap (512 MiB), so memory use is flat no matter how large the
//! input is. Files can be scanned sequentially or split into line-aligned
//! byte ranges and scanned by a fork-join worker pool, with per-worker
//! bitmaps folded together after the join.
//!
//! The result is independent of worker count and scheduling order: set
//! membership is commutative and idempotent, and no bitmap is ever shared
//! between workers mid-scan.

pub mod bitmap;
pub mod chunk;
pub mod codec;
pub mod error;
pub mod logging;
pub mod scan;
pub mod stats;

pub use bitmap::{MembershipSet, ADDRESS_SPACE_BITS};
pub use chunk::{plan_chunks, ByteRange};
pub use codec::parse_ipv4;
pub use error::{Result, UniqipError};
pub use scan::{scan_parallel, scan_sequential};
pub use stats::MemoryUsage;
