//! Generates a type-safe C++ header for the Vulkan API. In order to use, first create a
//! [`VkRegistry`] from the contents of a Vulkan XML file, and then call
//! [`gen_cpp()`](VkRegistry::gen_cpp) or [`gen_cpp_to()`](VkRegistry::gen_cpp_to) with a
//! [`GenConfig`].
//!
//! ```no_run
//! let xml = std::fs::read("vk.xml")?;
//! let header = vk_cpp_generator::VkRegistry::new(&xml)?.gen_cpp(Default::default())?;
//! std::fs::write("vulkan.hpp", header)?;
//! # Ok::<(), vk_cpp_generator::Error>(())
//! ```
//!
//! The header wraps enums in `enum class`es, bitmasks in `vk::Flags<>`, handles and structs in
//! classes that are layout compatible with their C counterparts, and commands in inline functions
//! taking the wrapper types. The intermediate model is public in [`generator::model`] for callers
//! who want to render something else.

pub mod error;
pub mod registry;
pub mod generator;

pub use crate::error::{Error, Result};
pub use crate::registry::VkRegistry;
pub use crate::generator::GenConfig;
