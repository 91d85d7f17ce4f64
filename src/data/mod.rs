//! Data layer: core types, dataset construction, and filtering.
//!
//! Architecture:
//! ```text
//!  cleaned_customer.csv   cleaned_credit.csv
//!            │                   │
//!            ▼                   ▼
//!        ┌──────────────────────────┐
//!        │  loader                  │  read CSV → RawTable
//!        └──────────────────────────┘
//!                     │
//!                     ▼
//!        ┌──────────────────────────┐
//!        │  builder                 │  join, drop key, parse TIMEID,
//!        └──────────────────────────┘  candidate lists → Dataset
//!                     │
//!                     ▼
//!        ┌──────────────────────────┐
//!        │  filter                  │  zip AND month AND year,
//!        └──────────────────────────┘  newest first → row indices
//! ```

pub mod builder;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

#[cfg(test)]
mod filter_props;
