//! Identifier rewriting between the registry's C names and the names used in the generated header.

/// Vendor tags that are stripped from names before case conversion.
pub const KNOWN_TAGS: &[&str] = &["KHR", "EXT"];

/// `VkImageLayout` -> `ImageLayout`. Used for handles, enums, bitmasks, structs and type references.
pub fn convert_vk_name(name: &str) -> &str {
    name.strip_prefix("Vk").unwrap_or(name)
}

/// `vkCreateInstance` -> `createInstance`
pub fn convert_command_name(name: &str) -> String {
    let name = name.strip_prefix("vk").unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None        => String::new()
    }
}

/// `PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO` -> `PipelineDepthStencilStateCreateInfo`
///
/// A letter that follows a digit keeps its case, so `R8G8B8A8_UNORM` becomes `R8G8B8A8Unorm`.
pub fn to_camel_case(s: &str) -> String {
    if s.chars().count() <= 1 {
        return s.to_owned();
    }

    let mut out = String::with_capacity(s.len());
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c != '_' {
            match prev {
                None                                          => out.push(c),
                Some(p) if p == '_' || p.is_ascii_digit()     => out.push(c),
                Some(_)                                       => out.extend(c.to_lowercase())
            }
        }
        prev = Some(c);
    }
    out
}

/// `PipelineDepthStencilStateCreateInfo` -> `PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO`
pub fn to_snake_case(s: &str) -> String {
    if s.chars().count() <= 1 {
        return s.to_owned();
    }

    let mut out = String::with_capacity(s.len() + 8);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if let Some(p) = prev {
            if c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
        prev = Some(c);
    }
    out
}

/// Splits a known vendor tag off the end of `s`, with or without a leading underscore.
///
/// Returns the untagged name and the tag, which is empty if none was found.
pub fn trim_tag_suffix<'a>(s: &'a str, tags: &[&'a str]) -> (&'a str, &'a str) {
    for &tag in tags {
        if let Some(stem) = s.strip_suffix(tag) {
            return (stem.strip_suffix('_').unwrap_or(stem), tag);
        }
    }
    (s, "")
}

/// `VkSurfaceTransformFlagsKHR` -> `VkSurfaceTransformFlagBitsKHR`
///
/// Reconstructs the name of the enum that holds the bits of a bitmask, for bitmasks that do not
/// name it in a `requires` attribute.
pub fn bitmask_to_enum_name(name: &str, tags: &[&str]) -> String {
    let (stem, tag) = trim_tag_suffix(name, tags);
    match stem.strip_suffix("Flags") {
        Some(base) => format!("{}FlagBits{}", base, tag),
        None       => format!("{}{}", stem, tag)
    }
}

/// `SwapchainCreateInfoKHR` -> `VK_STRUCTURE_TYPE_SWAPCHAIN_CREATE_INFO_KHR`
pub fn struct_to_type_name(name: &str, tags: &[&str]) -> String {
    let (stem, tag) = trim_tag_suffix(name, tags);
    let mut type_name = format!("VK_STRUCTURE_TYPE_{}", to_snake_case(stem));
    if !tag.is_empty() {
        type_name.push('_');
        type_name.push_str(tag);
    }
    type_name
}

/// Converts the name of an enum variant into a `vk::` enumerator, e.g. `VK_IMAGE_TYPE_2D` in
/// `VkImageType` becomes `e2D`, and `VK_CULL_MODE_FRONT_BIT` in `VkCullModeFlagBits` becomes `eFront`.
///
/// `expand` is the shared variant prefix that older registries give on the `<enums>` tag. Without
/// it, the prefix is derived from the enum name.
pub fn convert_enum_value_name(expand: Option<&str>, enum_name: &str, name: &str, tags: &[&str]) -> String {
    let mut name = name;

    match expand.filter(|e| !e.is_empty() && name.starts_with(e)) {
        Some(expand) => name = &name[expand.len()..],
        None         => {
            let (stem, _) = trim_tag_suffix(enum_name, tags);
            let prefix = to_snake_case(stem.strip_suffix("FlagBits").unwrap_or(stem));
            if name.starts_with(&prefix[..]) {
                name = name.get(prefix.len() + 1..).unwrap_or("");
            }
        }
    }

    // VkResult variants are VK_SUCCESS, VK_ERROR_..., not VK_RESULT_...
    if enum_name == "VkResult" {
        name = name.strip_prefix("VK_").unwrap_or(name);
    }

    let (name, _) = trim_tag_suffix(name, tags);
    let name = name.strip_suffix("_BIT").unwrap_or(name);
    format!("e{}", to_camel_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_and_snake_round_trip() {
        let snake = "PIPELINE_DEPTH_STENCIL_STATE_CREATE_INFO";
        let camel = to_camel_case(snake);
        assert_eq!(camel, "PipelineDepthStencilStateCreateInfo");
        assert_eq!(to_snake_case(&camel), snake);
    }

    #[test]
    fn digits_keep_following_case() {
        assert_eq!(to_camel_case("R8G8B8A8_UNORM"), "R8G8B8A8Unorm");
        assert_eq!(to_camel_case("TYPE_1D"), "Type1D");
        assert_eq!(to_snake_case("Offset3D"), "OFFSET3_D");
        assert_eq!(to_snake_case("ImageType2d"), "IMAGE_TYPE2D");
        assert_eq!(to_camel_case("X"), "X");
    }

    #[test]
    fn strips_prefixes() {
        assert_eq!(convert_vk_name("VkImageLayout"), "ImageLayout");
        assert_eq!(convert_vk_name("uint32_t"), "uint32_t");
        assert_eq!(convert_command_name("vkCreateInstance"), "createInstance");
        assert_eq!(convert_command_name("vkCmdDraw"), "cmdDraw");
    }

    #[test]
    fn vendor_tags() {
        assert_eq!(trim_tag_suffix("VkSurfaceKHR", KNOWN_TAGS), ("VkSurface", "KHR"));
        assert_eq!(trim_tag_suffix("VK_FOO_EXT", KNOWN_TAGS), ("VK_FOO", "EXT"));
        assert_eq!(trim_tag_suffix("VkImage", KNOWN_TAGS), ("VkImage", ""));
        assert_eq!(bitmask_to_enum_name("VkCullModeFlags", KNOWN_TAGS), "VkCullModeFlagBits");
        assert_eq!(bitmask_to_enum_name("VkSurfaceTransformFlagsKHR", KNOWN_TAGS), "VkSurfaceTransformFlagBitsKHR");
        assert_eq!(struct_to_type_name("SwapchainCreateInfoKHR", KNOWN_TAGS), "VK_STRUCTURE_TYPE_SWAPCHAIN_CREATE_INFO_KHR");
        assert_eq!(struct_to_type_name("ApplicationInfo", KNOWN_TAGS), "VK_STRUCTURE_TYPE_APPLICATION_INFO");
    }

    #[test]
    fn enum_values() {
        assert_eq!(convert_enum_value_name(None, "VkCullModeFlagBits", "VK_CULL_MODE_FRONT_BIT", KNOWN_TAGS), "eFront");
        assert_eq!(convert_enum_value_name(None, "VkImageLayout", "VK_IMAGE_LAYOUT_UNDEFINED", KNOWN_TAGS), "eUndefined");
        assert_eq!(convert_enum_value_name(Some("VK_IMAGE_TYPE"), "VkImageType", "VK_IMAGE_TYPE_2D", KNOWN_TAGS), "e2D");
        assert_eq!(convert_enum_value_name(None, "VkResult", "VK_ERROR_OUT_OF_HOST_MEMORY", KNOWN_TAGS), "eErrorOutOfHostMemory");
        assert_eq!(convert_enum_value_name(None, "VkResult", "VK_SUBOPTIMAL_KHR", KNOWN_TAGS), "eSuboptimal");
        assert_eq!(convert_enum_value_name(None, "VkColorSpaceKHR", "VK_COLOR_SPACE_SRGB_NONLINEAR_KHR", KNOWN_TAGS), "eSrgbNonlinear");
    }
}
