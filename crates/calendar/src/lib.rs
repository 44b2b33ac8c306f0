//! # nimbus-calendar
//!
//! Monthly timestamps for city temperature series.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["\"2000-01\" / \"2000-01-01\""] -->|"YearMonth::parse()"| B["YearMonth"]
//!     B -->|".next()"| B
//!     B -->|".offset(n)"| B
//!     B -->|"month_sequence()"| C["Vec of YearMonth"]
//!     B -->|"Display"| D["\"YYYY-MM\""]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use nimbus_calendar::{YearMonth, month_sequence};
//!
//! let start = YearMonth::new(2011, 11)?;
//! let months = month_sequence(start.next(), 3);
//! assert_eq!(months[2].to_string(), "2012-02");
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `month` | Year-month newtype, parsing and formatting |
//! | `sequence` | Contiguous monthly sequences |
//! | `error` | Error types |

mod error;
mod month;
mod sequence;

pub use error::CalendarError;
pub use month::YearMonth;
pub use sequence::{is_monthly_cadence, month_sequence};
