//! Serde support for filters and their configuration.
//!
//! Only available with the `serde` feature:
//!
//! ```toml
//! [dependencies]
//! bloomslot = { version = "0.1", features = ["serde"] }
//! ```
//!
//! [`Filter`](crate::Filter) implements `Serialize` and `Deserialize` for any
//! serde format. [`FilterConfig`](crate::FilterConfig) and
//! [`Strategy`](crate::Strategy) derive both.
//!
//! For files and sockets prefer [`Filter::write_to`](crate::Filter::write_to),
//! which writes the fixed little-endian format without an intermediate copy.
//!
//! # Examples
//!
//! ```
//! use bloomslot::PackedBitFilter;
//!
//! let filter = PackedBitFilter::new(1024, 3).unwrap();
//! filter.insert("hello").unwrap();
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! let restored: PackedBitFilter = serde_json::from_str(&json).unwrap();
//! assert!(restored.lookup("hello").unwrap());
//! ```

mod filter;
