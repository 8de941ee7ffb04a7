//! The semantic model of the header: every handle, enum, bitmask, struct and command that will
//! be emitted, with its C++ name, its guard and a converter for every member and parameter.

use std::collections::HashMap;

use crate::error::Result;
use crate::registry::{VkRegistry, VkType, VkMember, VkCommand};
use super::GenConfig;
use super::analyzed::{TypeDescriptor, assemble_type, relocate_name_array};
use super::converter::{Converter, CastNames};
use super::names::{self, convert_vk_name};
use super::sort::sort_structs;

/// A preprocessor guard around an entity, e.g. `#ifdef VK_USE_PLATFORM_XLIB_KHR` / `#endif`.
/// Both lines are empty for unconditional entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Protect {
    pub begin: String,
    pub end: String
}

impl Protect {
    fn ifdef(symbol: &str) -> Protect {
        Protect {
            begin: format!("#ifdef {}", symbol),
            end: "#endif".to_owned()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin.is_empty() && self.end.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppHandle {
    pub protect: Protect,
    pub name: String,
    pub vk_name: String,
    /// Dispatchable handles are pointers and therefore distinct types in C, so they can convert
    /// implicitly. Non-dispatchable handles may all be `uint64_t`.
    pub type_safe: bool
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppEnumValue {
    pub name: String,
    pub vk_name: String
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppEnum {
    pub protect: Protect,
    pub name: String,
    pub vk_name: String,
    pub values: Vec<CppEnumValue>,
    /// Set for `FlagBits` enums, which are emitted together with their bitmask
    pub used_by_bitmask: bool
}

impl CppEnum {
    fn empty(vk_name: &str) -> CppEnum {
        CppEnum {
            protect: Protect::default(),
            name: convert_vk_name(vk_name).to_owned(),
            vk_name: vk_name.to_owned(),
            values: Vec::new(),
            used_by_bitmask: false
        }
    }

    fn push_value(&mut self, value: CppEnumValue) {
        if self.values.iter().any(|v| v.name == value.name) {
            log::debug!("skipping {}: {}::{} already exists", value.vk_name, self.name, value.name);
        } else {
            self.values.push(value);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppBitMask {
    pub protect: Protect,
    pub name: String,
    pub vk_name: String,
    /// The enum of the individual bits
    pub bits: CppEnum
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppMember {
    pub name: String,
    /// Type as seen by users of the wrapper, e.g. `const ApplicationInfo*`
    pub typ: String,
    /// Type of the field in the C struct, e.g. `const VkApplicationInfo*`
    pub vk_type: String,
    pub at: TypeDescriptor,
    pub converter: Converter
}

/// Command parameters carry exactly what struct members do.
pub type CppParam = CppMember;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppStruct {
    pub protect: Protect,
    pub name: String,
    pub vk_name: String,
    /// The `VkStructureType` value stored in `sType`
    pub type_name: String,
    pub has_stype: bool,
    /// Returned by the API only, so the wrapper has no setters
    pub read_only: bool,
    pub is_union: bool,
    pub members: Vec<CppMember>
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppCommand {
    pub protect: Protect,
    pub name: String,
    pub vk_name: String,
    pub ret_type: String,
    pub ret_vk_type: String,
    pub params: Vec<CppParam>
}

/// Everything that goes into the header, in emission order. Structs are sorted so that embedded
/// structs come first.
#[derive(Debug, Clone, Default)]
pub struct GenPreproc {
    pub handles: Vec<CppHandle>,
    pub enums: Vec<CppEnum>,
    pub bitmasks: Vec<CppBitMask>,
    pub structs: Vec<CppStruct>,
    pub commands: Vec<CppCommand>
}

impl GenPreproc {
    pub fn new(registry: &VkRegistry, config: &GenConfig) -> Result<GenPreproc> {
        let tags = config.vendor_tags;
        let mut gen = GenPreproc::default();
        // Native type name -> converter for everything that needs more than a plain copy
        let mut converters: HashMap<String, Converter> = HashMap::with_capacity(registry.types.len());
        let mut enum_map: HashMap<String, CppEnum> = HashMap::with_capacity(registry.enums.len());
        let mut protect_map: HashMap<&str, Protect> = HashMap::new();

        for ex in &registry.extns {
            if let Some(ref symbol) = ex.protect {
                for name in ex.require_types.iter().chain(&ex.require_commands) {
                    protect_map.insert(&name[..], Protect::ifdef(symbol));
                }
            }
        }
        let protect_of = |name: &str| protect_map.get(name).cloned().unwrap_or_default();

        for xe in &registry.enums {
            if xe.kind.is_none() {
                // API constants
                continue;
            }

            let mut e = CppEnum::empty(&xe.name);
            e.protect = protect_of(&xe.name);
            for v in &xe.variants {
                e.push_value(CppEnumValue {
                    name: names::convert_enum_value_name(xe.expand.as_deref(), &xe.name, v.name(), tags),
                    vk_name: v.name().to_owned()
                });
            }
            converters.insert(xe.name.clone(), Converter::StaticCast(CastNames::new(&e.name[..], &xe.name[..])));
            enum_map.insert(xe.name.clone(), e);
        }

        for ex in registry.extns.iter().filter(|ex| !ex.disabled) {
            for &(ref extends, ref name) in &ex.require_enums {
                let expand = registry.enums.iter()
                                           .find(|xe| xe.name == *extends)
                                           .and_then(|xe| xe.expand.as_deref());
                if let Some(e) = enum_map.get_mut(&extends[..]) {
                    let value = CppEnumValue {
                        name: names::convert_enum_value_name(expand, extends, name, tags),
                        vk_name: name.clone()
                    };
                    e.push_value(value);
                }
            }
        }

        // Bitmasks first, so that every enum used by a bitmask is known before enums are emitted.
        for t in registry.types.iter().filter(|t| t.is_category("bitmask") && t.alias.is_none()) {
            if t.inner_type != "VkFlags" {
                log::warn!("unrecognized bitmask type `{}` for {}", t.inner_type, t.type_name());
                continue;
            }

            let vk_name = t.type_name();
            let enum_name = t.requires.clone().unwrap_or_else(|| names::bitmask_to_enum_name(vk_name, tags));
            let bits = enum_map.entry(enum_name.clone())
                               .or_insert_with(|| {
                                   log::warn!("{} has no <enums> block, generating an empty {}", vk_name, enum_name);
                                   CppEnum::empty(&enum_name)
                               });
            // The bitmask's own guard covers its enum
            bits.protect = Protect::default();
            bits.used_by_bitmask = true;

            let bitmask = CppBitMask {
                protect: protect_of(vk_name),
                name: convert_vk_name(vk_name).to_owned(),
                vk_name: vk_name.to_owned(),
                bits: bits.clone()
            };
            converters.insert(vk_name.to_owned(), Converter::BitMask(CastNames::new(&bitmask.name[..], vk_name)));
            gen.bitmasks.push(bitmask);
        }

        for t in registry.types.iter().filter(|t| t.alias.is_none()) {
            match t.category.as_ref().map(|c| &c[..]) {
                Some("handle") => {
                    let handle = CppHandle {
                        protect: protect_of(t.type_name()),
                        name: convert_vk_name(t.type_name()).to_owned(),
                        vk_name: t.type_name().to_owned(),
                        type_safe: t.inner_type == "VK_DEFINE_HANDLE"
                    };
                    converters.insert(handle.vk_name.clone(), Converter::Handle(CastNames::new(&handle.name[..], &handle.vk_name[..])));
                    gen.handles.push(handle);
                }

                Some("enum") => {
                    let name = t.type_name();
                    match enum_map.get(name) {
                        Some(e) if e.used_by_bitmask => (),
                        Some(e)                      => gen.enums.push(e.clone()),
                        None                         => {
                            log::warn!("enum {} has no <enums> block, generating an empty one", name);
                            let mut e = CppEnum::empty(name);
                            e.protect = protect_of(name);
                            gen.enums.push(e);
                        }
                    }
                }

                Some("struct") |
                Some("union")  => {
                    if config.skip_types.contains(&t.type_name()) {
                        log::info!("skipping {}", t.type_name());
                        continue;
                    }

                    let s = build_struct(t, &protect_of(t.type_name()), tags)?;
                    converters.insert(s.vk_name.clone(), Converter::Reinterpret(CastNames::new(&s.name[..], &s.vk_name[..])));
                    gen.structs.push(s);
                }

                _ => ()
            }
        }

        for c in &registry.commands {
            if let Some(ref alias) = c.alias {
                log::debug!("skipping {}, an alias of {}", c.name(), alias);
                continue;
            }
            gen.commands.push(build_command(c, &protect_of(c.name()))?);
        }

        // Converters are resolved once every entity is registered
        for s in gen.structs.iter_mut() {
            for m in s.members.iter_mut() {
                m.converter = Converter::select(&m.at, &converters, true);
            }
        }
        for c in gen.commands.iter_mut() {
            for p in c.params.iter_mut() {
                p.converter = Converter::select(&p.at, &converters, false);
            }
        }

        gen.structs = sort_structs(gen.structs)?;

        log::info!("model: {} handles, {} enums, {} bitmasks, {} structs, {} commands",
                   gen.handles.len(), gen.enums.len(), gen.bitmasks.len(), gen.structs.len(), gen.commands.len());
        Ok(gen)
    }
}

fn build_struct(t: &VkType, protect: &Protect, tags: &[&str]) -> Result<CppStruct> {
    let name = convert_vk_name(t.type_name()).to_owned();
    let mut stype_value = None;
    let mut members = Vec::with_capacity(t.members.len());

    for m in &t.members {
        let (member_name, extra) = relocate_name_array(&m.field_name, &m.extra);
        if "sType" == member_name {
            stype_value = Some(m.values.as_ref()
                                       .and_then(|v| v.split(',').next())
                                       .map(str::to_owned)
                                       .unwrap_or_else(|| names::struct_to_type_name(&name, tags)));
        }
        members.push(build_member(&member_name, m, &extra)?);
    }

    Ok(CppStruct {
        protect: protect.clone(),
        vk_name: t.type_name().to_owned(),
        has_stype: stype_value.is_some(),
        type_name: stype_value.unwrap_or_default(),
        read_only: t.returned_only,
        is_union: t.is_category("union"),
        members: members,
        name: name
    })
}

fn build_command(c: &VkCommand, protect: &Protect) -> Result<CppCommand> {
    let params = c.params.iter()
                         .map(|p| build_member(&p.field_name, p, &p.extra))
                         .collect::<Result<Vec<_>>>()?;

    Ok(CppCommand {
        protect: protect.clone(),
        name: names::convert_command_name(c.name()),
        vk_name: c.name().to_owned(),
        ret_type: assemble_type(convert_vk_name(&c.proto.field_type), &c.proto.extra),
        ret_vk_type: assemble_type(&c.proto.field_type, &c.proto.extra),
        params: params
    })
}

fn build_member(name: &str, m: &VkMember, extra: &str) -> Result<CppMember> {
    Ok(CppMember {
        name: name.to_owned(),
        typ: assemble_type(convert_vk_name(&m.field_type), extra),
        vk_type: assemble_type(&m.field_type, extra),
        at: TypeDescriptor::analyze(name, &m.field_type, extra)?,
        // Bound once all entities are known
        converter: Converter::PassThrough
    })
}
