//! RADIUS Capture Inspector
//!
//! This crate decodes captured RADIUS packets with the `radius-codec`
//! dictionary and reports what they carry.
//!
//! # Features
//!
//! - Request/reply correlation by identifier
//! - Request and Response Authenticator checks
//! - Message-Authenticator checks
//! - Service profile to speed tier lookup
//! - JSON configuration
//!
//! # Example
//!
//! ```rust
//! use radius_codec::{Code, Packet};
//! use radius_inspect::Inspector;
//!
//! let mut request = Packet::new(Code::AccountingRequest, "testing123");
//! request.add("Filter-Id", "daa-1024").unwrap();
//! let bytes = request.encode().unwrap();
//!
//! let inspector = Inspector::new("testing123");
//! let report = inspector.inspect(&bytes).unwrap();
//! assert_eq!(report.authentic, Some(true));
//! assert_eq!(report.speed.as_deref(), Some("1124"));
//! ```

pub mod config;
pub mod inspect;
pub mod session_cache;
pub mod speed_map;

pub use config::{ConfigError, InspectConfig};
pub use inspect::{InspectError, Inspector, Report};
pub use session_cache::SessionCache;
pub use speed_map::{SpeedMap, DEFAULT_SPEED};
