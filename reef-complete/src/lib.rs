//! Resolves a cursor offset in a shell script into a completion target.
//!
//! Given where the user is typing, [`Resolver::get_completion_targets`] reports the command the
//! cursor is in and the argument, redirect target or variable name under it, or that the
//! cursor is beside a finished command, outside any command, or inside malformed syntax. A
//! completion UI uses the result to decide which substring a completion replaces.
//!
//! When the cursor sits inside a syntax error, the resolver synthesizes the delimiters the
//! error region is missing (quotes, brackets, `end` for open blocks), parses the corrected
//! text, resolves the cursor there, and maps the result back to the original text.
//!
//! The resolver works on any parser implementing the traits in [`syntax`]; [`FishParser`]
//! binds the tree-sitter fish grammar to them.
//!
//! ```
//! use reef_complete::{CompletionTarget, Range};
//!
//! let target = reef_complete::get_completion_targets("echo foo", 8)?;
//! assert_eq!(
//!     target,
//!     CompletionTarget::Inside {
//!         command: Range::new(0, 8),
//!         argument: Some(Range::new(5, 8)),
//!     }
//! );
//! # Ok::<(), reef_complete::CompletionError>(())
//! ```

pub mod correction;
pub mod debug;
pub mod kinds;
pub mod navigator;
pub mod syntax;
pub mod trace_categories;

mod complete;
mod error;
mod fish;
mod mapping;
mod target;

pub use complete::{Resolver, ResolverOptions, get_completion_targets};
pub use debug::{TreeDump, dump_tree};
pub use error::CompletionError;
pub use fish::{FishParser, FishTree};
pub use mapping::{Insertion, OffsetMapping};
pub use syntax::{SyntaxNode, SyntaxParser, SyntaxTree};
pub use target::{CompletionTarget, Range};
