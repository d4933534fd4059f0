//! # rdm-records
//!
//! Generic, ordered record lists for RDM metadata trees.
//!
//! A record carries an optional key and a value that is either text or a
//! nested list of records, so one list type models both mappings (keyed
//! records) and sequences (keyless records). Records are stored in a
//! [`RecordArena`] and linked into doubly-linked chains by [`RecordId`];
//! a [`List`] is the owning handle to one such chain.
//!
//! ## Example
//!
//! ```rust
//! use rdm_records::{ByteString, List, RecordArena, Value};
//!
//! let mut arena = RecordArena::new();
//! let mut list = List::new();
//!
//! let id = arena.new_record().unwrap();
//! arena.set_key(id, Some(ByteString::from("title"))).unwrap();
//! arena
//!     .set_value(id, Value::SingleLineText(ByteString::from("My Project")))
//!     .unwrap();
//! arena.push(&mut list, id).unwrap();
//!
//! let hit = arena.find_str(arena.first(list.handle()), "title").unwrap();
//! assert_eq!(arena.get(hit).unwrap().value().as_text().unwrap(), "My Project");
//!
//! arena.destroy_list(list);
//! assert_eq!(arena.live_count(), 0);
//! ```

mod arena;
mod byte_string;
mod error;
mod list;
mod record;

pub use arena::RecordArena;
pub use byte_string::ByteString;
pub use error::{RecordError, Result};
pub use list::{Iter, List};
pub use record::{Record, RecordId, RecordKind, Value};
