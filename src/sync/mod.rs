//! Concurrency discipline for filter slot storage.
//!
//! Each filter owns exactly one [`SyncGuard`]: a single reader/writer lock
//! over its whole slot array. Two access paths exist:
//!
//! ## Synchronous (`&self`)
//!
//! Every mark takes exclusive access, every read takes shared access. This
//! is the default and the only path usable through `Arc<Filter>`.
//!
//! ## Unsynchronized (`&mut self`)
//!
//! The `*_unsynced` filter methods reach storage through
//! [`SyncGuard::get_mut`] and never touch the lock. They need an exclusive
//! borrow, so single-threaded or externally coordinated callers skip lock
//! traffic while the compiler rules out mixing the two paths concurrently.
//!
//! # Extension Point
//!
//! One lock serializes all writers. A striped design (independent locks per
//! slot range) would change the ordering guarantees writers observe, so it
//! belongs behind a separate guard type rather than inside this one.
//!
//! # Examples
//!
//! ```
//! use bloomslot::PackedBitFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(PackedBitFilter::new(1 << 16, 4).unwrap());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let f = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 f.insert(format!("{t}-{i}")).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert!(filter.lookup("3-99").unwrap());
//! ```

pub mod guard;

pub use guard::SyncGuard;
