//! Fetching layer: browsing session management and the capability seam
//!
//! The pipeline core only sees the `PageFetcher` trait, so the concrete
//! transport (plain HTTP client today, a full automated browser if the
//! site escalates) is swappable as long as it honors the ready-wait
//! contract.

mod session;

pub use session::{HttpSession, PageFetcher, RawPage, ReadyCondition};
