//! # SkillSwap CLI
//!
//! Credential helpers for local development. Login lives outside this
//! service, so these commands are the way to get a token for manual testing.
//!
//! ```ignore
//! use skillswap_cli::tokens::{issue, inspect};
//!
//! let token = issue("64f1c0ffee", None, &config)?;
//! println!("{}", inspect(&token, &config));
//! ```

pub mod tokens;
