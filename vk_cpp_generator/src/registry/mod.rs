mod crawler;

use crate::error::Result;
use xml::{EventReader, ParserConfig};

/// The parts of the Vulkan registry the header generator needs, in document order.
///
/// The registry is a plain description of the XML: names are kept exactly as they appear, and no
/// cross-references are resolved. That is the job of the generator's model builder.
#[derive(Debug, Clone, Default)]
pub struct VkRegistry {
    pub types: Vec<VkType>,
    pub enums: Vec<VkEnums>,
    pub commands: Vec<VkCommand>,
    pub extns: Vec<VkExtn>
}

impl VkRegistry {
    pub fn new(vk_xml: &[u8]) -> Result<VkRegistry> {
        let mut registry = VkRegistry {
            types: Vec::with_capacity(512),
            enums: Vec::with_capacity(128),
            commands: Vec::with_capacity(256),
            extns: Vec::with_capacity(64)
        };
        let config = ParserConfig::new()
            .whitespace_to_characters(true)
            .cdata_to_characters(true)
            .ignore_comments(true);
        let xml_reader = EventReader::new_with_config(vk_xml, config);
        crawler::crawl(xml_reader.into_iter(), &mut registry)?;
        log::debug!("crawled {} types, {} enum blocks, {} commands, {} extensions",
                    registry.types.len(), registry.enums.len(), registry.commands.len(), registry.extns.len());
        Ok(registry)
    }
}

/// A `<type>` tag inside `<types>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkType {
    /// The `name` attribute. Empty for types that put their name in a `<name>` child.
    pub name: String,
    pub category: Option<String>,
    pub requires: Option<String>,
    /// Set for types that are only another name for an existing type
    pub alias: Option<String>,
    pub returned_only: bool,
    pub members: Vec<VkMember>,
    /// Text of the `<name>` child, used by handles and bitmasks.
    pub inner_name: String,
    /// Text of the `<type>` child, e.g. `VkFlags` or `VK_DEFINE_HANDLE`.
    pub inner_type: String
}

impl VkType {
    /// The name the registry refers to this type by.
    pub fn type_name(&self) -> &str {
        if self.name.is_empty() {&self.inner_name} else {&self.name}
    }

    pub fn is_category(&self, category: &str) -> bool {
        self.category.as_ref().map_or(false, |c| c == category)
    }
}

/// A typed, named declaration: a struct member, a command parameter or a command prototype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkMember {
    /// The text of `<type>`, e.g. `VkOffset3D` or `uint32_t`
    pub field_type: String,
    /// The text of `<name>`
    pub field_name: String,
    /// All text that surrounds `<type>` and `<name>`, e.g. `const *` or `[4]`. Array sizes given
    /// as an `<enum>` child are spliced back in, so `[<enum>VK_UUID_SIZE</enum>]` reads `[VK_UUID_SIZE]`.
    pub extra: String,
    /// The `values` attribute, which names the discriminator value of `sType` members.
    pub values: Option<String>
}

/// A variant of a vulkan enum
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VkVariant {
    Value {
        name: String,
        value: String
    },

    Bitpos {
        name: String,
        bitpos: u32
    },

    Alias {
        name: String,
        alias: String
    }
}

impl VkVariant {
    pub fn name(&self) -> &str {
        use self::VkVariant::*;
        match *self {
            Value{ref name, ..}  |
            Bitpos{ref name, ..} |
            Alias{ref name, ..} => name
        }
    }
}

/// An `<enums>` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkEnums {
    pub name: String,
    /// `enum`, `bitmask` or nothing for the API constants block
    pub kind: Option<String>,
    /// Prefix shared by every variant name, present in older registries
    pub expand: Option<String>,
    pub variants: Vec<VkVariant>
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkCommand {
    /// The return type and the command name
    pub proto: VkMember,
    pub params: Vec<VkMember>,
    /// `<command name="vkFooKHR" alias="vkFoo"/>`: the name of the command this one promotes
    pub alias: Option<String>
}

impl VkCommand {
    /// Alias entries have no prototype and are named by their `name` attribute instead.
    pub fn name(&self) -> &str {
        &self.proto.field_name
    }
}

/// An `<extension>` and the names its `<require>` blocks pull in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VkExtn {
    pub name: String,
    pub num: u32,
    /// The preprocessor symbol that guards the extension's declarations, e.g. `VK_USE_PLATFORM_XLIB_KHR`
    pub protect: Option<String>,
    /// `supported="disabled"`: reserved numbers, never part of the API
    pub disabled: bool,
    pub require_types: Vec<String>,
    pub require_commands: Vec<String>,
    /// `(extends, name)` of each variant the extension adds to an existing enum
    pub require_enums: Vec<(String, String)>
}
