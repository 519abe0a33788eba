//! Unit test suite for mergefield
//!
//! Exercises the library API without the binary: the engine against the CRM
//! fixtures, and substitution edge cases on inline records.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod path_validity;
mod substitution;
