//! Run artifacts written to the output folder.
//!
//! # Submodules
//!
//! - [`titles`]: the headline list as plain text, one title per line
//! - [`json`]: a JSON snapshot of the whole run
//!
//! # Output Structure
//!
//! ```text
//! news_data/
//! ├── 1700000000000_stocks.txt
//! ├── 1700000000000_stocks.json
//! └── 1700000000000_stocks.JPG
//! ```
//!
//! All names share the run timestamp (epoch milliseconds) and keyword.

pub mod json;
pub mod titles;
