//! Statistics utilities for summarizing search runs.
//!
//! Provides descriptive statistics over score streams. The search core emits one
//! score per evaluation; the CLI feeds those scores through [`descriptive`] to
//! report how a run's score distribution looked.

pub mod descriptive;
