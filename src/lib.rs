//! Declare external source dependencies and render the CMake blocks that fetch them.
//!
//! Each [`DependencySpec`] describes one git repository by name, remote, and either a branch to
//! follow or a tag to pin. [`DependencySpec::fetchcontent_declare`] renders it as a
//! `shacl_FetchContent_Declare` call, built on CMake's [`FetchContent`] module.
//!
//! [`FetchContent`]: https://cmake.org/cmake/help/latest/module/FetchContent.html#fetchcontent
//!
//! # Usage
//!
//! ```rust
//! use fetch_declare::DependencySpec;
//!
//! let mut dimwits = DependencySpec::named("njoy::dimwits");
//! dimwits.set_tag("v1.0");
//!
//! assert_eq!(dimwits.library_name()?, "njoy::dimwits");
//!
//! let block = dimwits.fetchcontent_declare()?;
//! assert!(block.starts_with("shacl_FetchContent_Declare( dimwits\n"));
//! assert!(block.contains("    GIT_REPOSITORY  ../../njoy/dimwits\n"));
//! assert!(block.contains("    GIT_TAG         v1.0\n"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Several dependencies can be read from a manifest and rendered together:
//!
//! ```rust
//! use fetch_declare::{render_all, try_parse_toml};
//!
//! let manifest = r#"
//! [[dependency]]
//! name = "dimwits"
//! tag = "v1.0"
//!
//! [[dependency]]
//! remote = "https://github.com/njoy/catch-adapter"
//! setup = "set( CATCH_BUILD_TESTING OFF )"
//! "#;
//!
//! let cmake = render_all(&try_parse_toml(manifest)?)?;
//! assert!(cmake.contains("GIT_TAG         origin/master"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Fields of a dependency
//!
//! - `name`: the library name, possibly namespaced (`njoy::dimwits`). Implied by the remote if
//!   absent.
//! - `remote`: the repository URL or path. Implied by the name if absent (`../../njoy/<name>`).
//! - Any one of `branch`/`tag`. The default is to follow the `master` branch.
//! - `setup`: CMake text placed after the declaration.

mod dependency;
mod error;
mod manifest;
mod reference;

#[doc(inline)]
pub use crate::dependency::*;
#[doc(inline)]
pub use crate::error::{ConfigurationError, ManifestError};
#[doc(inline)]
pub use crate::manifest::*;
#[doc(inline)]
pub use crate::reference::*;
