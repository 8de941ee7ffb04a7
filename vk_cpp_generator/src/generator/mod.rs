pub mod names;
pub mod analyzed;
pub mod converter;
pub mod model;
pub mod sort;
mod render;

use std::default;
use std::io;

use crate::error::Result;
use crate::registry::VkRegistry;

use self::model::GenPreproc;
use self::render::GenTypes;

/// Options for the generated header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenConfig<'a> {
    /// The C++ namespace everything is declared in
    pub namespace: &'a str,
    /// First line of the header, usually `#pragma once` or an `#ifndef`/`#define` pair
    pub guard_begin: &'a str,
    /// Last line of the header, e.g. the `#endif` closing `guard_begin`
    pub guard_end: &'a str,
    /// The C header declaring the native API, as written between `<` and `>`
    pub vulkan_include: &'a str,
    /// Vendor suffixes that are stripped from names before case conversion and put back after
    pub vendor_tags: &'a [&'a str],
    /// Structs and unions that are left out of the header
    pub skip_types: &'a [&'a str]
}

impl<'a> default::Default for GenConfig<'a> {
    fn default() -> GenConfig<'a> {
        GenConfig {
            namespace: "vk",
            guard_begin: "#pragma once",
            guard_end: "",
            vulkan_include: "vulkan/vulkan.h",
            vendor_tags: names::KNOWN_TAGS,
            // Declared in vk.xml but never in vulkan.h
            skip_types: &["VkRect3D"]
        }
    }
}

impl VkRegistry {
    /// Builds the model of the whole registry and renders it into a C++ header.
    pub fn gen_cpp(&self, config: GenConfig) -> Result<String> {
        let processed = GenPreproc::new(self, &config)?;
        let gen_types = GenTypes::new(&processed)?;
        gen_types.write_header(&config)
    }

    /// Same as [`gen_cpp`](#method.gen_cpp), writing the header to `write`. Nothing is written if
    /// generation fails.
    pub fn gen_cpp_to<W: io::Write>(&self, write: &mut W, config: GenConfig) -> Result<()> {
        let header = self.gen_cpp(config)?;
        write.write_all(header.as_bytes())?;
        write.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn custom_config() {
        let xml = r#"<registry><types>
            <type category="struct" name="VkExtent2D"><member><type>uint32_t</type> <name>width</name></member></type>
            <type category="struct" name="VkRect2D"><member><type>VkExtent2D</type> <name>extent</name></member></type>
        </types></registry>"#;
        let registry = VkRegistry::new(xml.as_bytes()).unwrap();
        let config = GenConfig {
            namespace: "vkw",
            guard_begin: "#ifndef VKW_HPP\n#define VKW_HPP",
            guard_end: "#endif // VKW_HPP",
            vulkan_include: "vulkan/vulkan_core.h",
            skip_types: &["VkRect2D"],
            ..GenConfig::default()
        };

        let mut out = Vec::new();
        registry.gen_cpp_to(&mut out, config).unwrap();
        let header = String::from_utf8(out).unwrap();

        assert!(header.starts_with("#ifndef VKW_HPP\n#define VKW_HPP\n"));
        assert!(header.contains("#include <vulkan/vulkan_core.h>"));
        assert!(header.contains("namespace vkw {"));
        assert!(header.contains("class Extent2D {"));
        assert!(!header.contains("Rect2D"));
        assert!(header.ends_with("} // namespace vkw\n#endif // VKW_HPP\n"));
    }

    #[test]
    fn failures_write_nothing() {
        let xml = r#"<registry><types>
            <type category="struct" name="VkA"><member><type>VkB</type> <name>b</name></member></type>
            <type category="struct" name="VkB"><member><type>VkA</type> <name>a</name></member></type>
        </types></registry>"#;
        let registry = VkRegistry::new(xml.as_bytes()).unwrap();

        let mut out = Vec::new();
        match registry.gen_cpp_to(&mut out, GenConfig::default()) {
            Err(e @ Error::CyclicDependency(_)) => assert_eq!(e.stage(), "sorting"),
            other                               => panic!("expected a cycle, got {:?}", other)
        }
        assert!(out.is_empty());
    }
}
