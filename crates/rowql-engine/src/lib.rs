//! # rowql-engine
//!
//! Runs parsed rowql queries against tables of JSON rows.
//!
//! A [`DataSource`] holds named tables. [`load_path`] builds one from a
//! JSON file or a directory of `.json`/`.jsonl` files, and a [`Session`]
//! runs lines against it, routing `\`-prefixed meta-commands to
//! [`MetaCommand`] and everything else through the parser and
//! [`execute`].
//!
//! ```
//! use rowql_engine::{InMemoryDataSource, Output, Session};
//! use serde_json::json;
//!
//! let row = json!({"id": 1}).as_object().cloned().unwrap();
//! let session = Session::new(InMemoryDataSource::new().with_table("t", vec![row]));
//!
//! match session.run_line("SELECT * FROM t").unwrap() {
//!     Output::Rows(rows) => assert_eq!(rows.len(), 1),
//!     Output::Text(_) => unreachable!(),
//! }
//! ```

pub mod error;
pub mod executor;
pub mod meta;
pub mod reader;
pub mod session;
pub mod source;

pub use error::{EngineError, Result};
pub use executor::execute;
pub use meta::MetaCommand;
pub use reader::load_path;
pub use session::{Output, Session};
pub use source::{DataSource, InMemoryDataSource, MemoryTable, Row, Table, TableInfo};
