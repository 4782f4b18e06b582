//! packtypes-lib: declaration artifacts for packaged JavaScript libraries
//!
//! Given a package source directory and an output directory, this crate makes
//! sure `<out>/dist-types/index.d.ts` exists, taking it from the best source
//! available:
//! - hand-written `index.d.ts` / `src/index.d.ts`
//! - the project-local compiler in declaration-only mode
//! - published `@types/<name>` declarations
//! - inference from the compiled `dist-node` entry through a compiler toolchain
//!
//! `global` locates the user-level global package root used as one of the
//! toolchain search locations.

pub mod build;
pub mod consts;
pub mod global;
pub mod host;
pub mod manifest;
pub mod platform;
pub mod report;
pub mod toolchain;
pub mod util;
