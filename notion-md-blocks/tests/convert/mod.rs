//! Converter and tokenizer tests
//!
//! Document level behaviour of Markdown → blocks, plus property tests over
//! arbitrary input.

mod documents;
mod inline;
mod wire;
