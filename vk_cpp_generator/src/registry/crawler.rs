//! Module that contains a crawler function that crawls through the vulkan xml and fills a
//! Registry struct
use xml::reader::{Events, XmlEvent};
use xml::attribute::OwnedAttribute;
use std::io::Read;

use crate::error::{Error, Result};
use super::{VkRegistry, VkType, VkMember, VkVariant, VkEnums, VkCommand, VkExtn};

pub fn crawl<R: Read>(xml_events: Events<R>, registry: &mut VkRegistry) -> Result<()> {
    let mut type_buffer: Option<VkType> = None;
    let mut enums_buffer: Option<VkEnums> = None;
    let mut command_buffer: Option<VkCommand> = None;
    let mut extn_buffer: Option<VkExtn> = None;

    // A stack of the names of the currently open tags
    let mut vk_elements: Vec<String> = Vec::with_capacity(10);

    for event in xml_events {
        match event? {
            XmlEvent::StartElement{name, attributes, ..} => {
                let tag_name = name.local_name;
                let parent = vk_elements.last().map(|p| &p[..]);

                match (&tag_name[..], parent) {
                    ("type", Some("types")) =>
                        type_buffer = Some(VkType {
                            name: find_attribute(&attributes, "name").unwrap_or("").to_owned(),
                            category: find_attribute(&attributes, "category").map(str::to_owned),
                            requires: find_attribute(&attributes, "requires").map(str::to_owned),
                            alias: find_attribute(&attributes, "alias").map(str::to_owned),
                            returned_only: Some("true") == find_attribute(&attributes, "returnedonly"),
                            ..VkType::default()
                        }),
                    ("member", Some("type")) =>
                        match type_buffer {
                            Some(ref mut t) => t.members.push(VkMember {
                                values: find_attribute(&attributes, "values").map(str::to_owned),
                                ..VkMember::default()
                            }),
                            None            => return Err(Error::registry("\"member\" tag found outside of a type"))
                        },
                    ("member", _) => return Err(Error::registry("\"member\" tag found outside of \"types\" block")),

                    ("enums", Some("registry")) =>
                        if let Some(name) = find_attribute(&attributes, "name") {
                            enums_buffer = Some(VkEnums {
                                name: name.to_owned(),
                                kind: find_attribute(&attributes, "type").map(str::to_owned),
                                expand: find_attribute(&attributes, "expand").map(str::to_owned),
                                variants: Vec::with_capacity(8)
                            });
                        } else {return Err(Error::registry("could not find enums name"))},
                    ("enum", Some("enums")) =>
                        if let Some(ref mut enums) = enums_buffer {
                            enums.variants.push(parse_variant(&attributes)?);
                        },

                    ("command", Some("commands")) =>
                        command_buffer = Some(VkCommand {
                            proto: VkMember {
                                field_name: find_attribute(&attributes, "name").unwrap_or("").to_owned(),
                                ..VkMember::default()
                            },
                            alias: find_attribute(&attributes, "alias").map(str::to_owned),
                            ..VkCommand::default()
                        }),
                    ("param", Some("command")) =>
                        match command_buffer {
                            Some(ref mut c) => c.params.push(VkMember::default()),
                            None            => return Err(Error::registry("\"param\" tag found outside of a command"))
                        },

                    ("extension", Some("extensions")) =>
                        if let Some(name) = find_attribute(&attributes, "name") {
                            let num = match find_attribute(&attributes, "number") {
                                Some(num) => num.parse().map_err(|_| Error::registry(format!("invalid extension number \"{}\"", num)))?,
                                None      => 0
                            };
                            extn_buffer = Some(VkExtn {
                                name: name.to_owned(),
                                num: num,
                                protect: find_attribute(&attributes, "protect").map(str::to_owned),
                                disabled: Some("disabled") == find_attribute(&attributes, "supported"),
                                ..VkExtn::default()
                            });
                        } else {return Err(Error::registry("could not find extension name"))},
                    ("type", Some("require"))    =>
                        if let (Some(ex), Some(name)) = (extn_buffer.as_mut(), find_attribute(&attributes, "name")) {
                            ex.require_types.push(name.to_owned());
                        },
                    ("command", Some("require")) =>
                        if let (Some(ex), Some(name)) = (extn_buffer.as_mut(), find_attribute(&attributes, "name")) {
                            ex.require_commands.push(name.to_owned());
                        },
                    ("enum", Some("require")) =>
                        match (extn_buffer.as_mut(), find_attribute(&attributes, "extends"), find_attribute(&attributes, "name")) {
                            (Some(ex), Some(extends), Some(name)) if find_attribute(&attributes, "alias").is_none() =>
                                ex.require_enums.push((extends.to_owned(), name.to_owned())),
                            _ => ()
                        },
                    _ => ()
                }

                vk_elements.push(tag_name);
            }

            XmlEvent::EndElement{..} => {
                let tag_name = match vk_elements.pop() {
                    Some(t) => t,
                    None    => return Err(Error::registry("unexpected closing tag"))
                };
                let parent = vk_elements.last().map(|p| &p[..]);

                match (&tag_name[..], parent) {
                    ("type", Some("types")) =>
                        if let Some(mut t) = type_buffer.take() {
                            t.inner_name = t.inner_name.trim().to_owned();
                            t.inner_type = t.inner_type.trim().to_owned();
                            for m in t.members.iter_mut() {
                                trim_member(m);
                            }
                            registry.types.push(t);
                        },
                    ("enums", Some("registry")) =>
                        if let Some(e) = enums_buffer.take() {
                            registry.enums.push(e);
                        },
                    ("command", Some("commands")) =>
                        if let Some(mut c) = command_buffer.take() {
                            trim_member(&mut c.proto);
                            for p in c.params.iter_mut() {
                                trim_member(p);
                            }
                            registry.commands.push(c);
                        },
                    ("extension", Some("extensions")) =>
                        if let Some(ex) = extn_buffer.take() {
                            registry.extns.push(ex);
                        },
                    _ => ()
                }
            }

            XmlEvent::Characters(chars) => {
                let mut open = vk_elements.iter().rev().map(|t| &t[..]);
                let tags = (open.next(), open.next(), open.next());

                if let Some(ref mut t) = type_buffer {
                    match tags {
                        (Some("member"), _, _)          =>
                            if let Some(m) = t.members.last_mut() {m.extra.push_str(&chars)},
                        (Some(tag), Some("member"), _)  =>
                            if let Some(m) = t.members.last_mut() {
                                match tag {
                                    "type" => m.field_type.push_str(&chars),
                                    "name" => m.field_name.push_str(&chars),
                                    // Array length given as an API constant
                                    "enum" => m.extra.push_str(&chars),
                                    _      => ()
                                }
                            },
                        (Some("type"), Some("type"), _) => t.inner_type.push_str(&chars),
                        (Some("name"), Some("type"), _) => t.inner_name.push_str(&chars),
                        _                               => ()
                    }
                } else if let Some(ref mut c) = command_buffer {
                    // <param> also shows up inside <implicitexternsyncparams>, so the parent is checked
                    let target = match tags {
                        (Some("proto"), Some("command"), _)  |
                        (_, Some("proto"), Some("command")) => Some(&mut c.proto),
                        (Some("param"), Some("command"), _)  |
                        (_, Some("param"), Some("command")) => c.params.last_mut(),
                        _                                   => None
                    };

                    if let Some(decl) = target {
                        match tags.0 {
                            Some("type")                  => decl.field_type.push_str(&chars),
                            Some("name")                  => decl.field_name.push_str(&chars),
                            Some("proto") | Some("param") |
                            Some("enum")                  => decl.extra.push_str(&chars),
                            _                             => ()
                        }
                    }
                }
            }

            _ => ()
        }
    }

    if !vk_elements.is_empty() {
        return Err(Error::registry(format!("unclosed tag \"{}\"", vk_elements[vk_elements.len() - 1])));
    }
    Ok(())
}

fn parse_variant(attrs: &[OwnedAttribute]) -> Result<VkVariant> {
    let name = match find_attribute(attrs, "name") {
        Some(name) => name.to_owned(),
        None       => return Err(Error::registry("could not find enum variant name"))
    };

    if let Some(value) = find_attribute(attrs, "value") {
        Ok(VkVariant::Value{name: name, value: value.to_owned()})
    } else if let Some(bitpos) = find_attribute(attrs, "bitpos") {
        let bitpos = bitpos.parse().map_err(|_| Error::registry(format!("invalid bitpos \"{}\" in {}", bitpos, name)))?;
        Ok(VkVariant::Bitpos{name: name, bitpos: bitpos})
    } else if let Some(alias) = find_attribute(attrs, "alias") {
        Ok(VkVariant::Alias{name: name, alias: alias.to_owned()})
    } else {
        Err(Error::registry(format!("could not find value or bitpos in enum {}", name)))
    }
}

fn trim_member(member: &mut VkMember) {
    member.field_type = member.field_type.trim().to_owned();
    member.field_name = member.field_name.trim().to_owned();
    member.extra = member.extra.trim().to_owned();
}

fn find_attribute<'v>(source: &'v [OwnedAttribute], query: &str) -> Option<&'v str> {
    source.iter().find(|attr| attr.name.local_name == query).map(|res| &*res.value)
}
