use std::collections::BTreeMap;

use crate::error::{Error, Result};
use super::model::{CppStruct, CppMember};

/// Orders structs so that every struct comes after the structs it embeds by value.
///
/// The remaining structs are scanned repeatedly; each scan moves every struct with no embedded
/// dependency left in the remaining set to the output, in native name order. A scan that moves
/// nothing means the remaining structs embed each other, which is an error.
pub fn sort_structs(structs: Vec<CppStruct>) -> Result<Vec<CppStruct>> {
    let mut out = Vec::with_capacity(structs.len());
    // Keyed by native name, so each scan visits candidates in name order
    let mut remaining: BTreeMap<String, CppStruct> = structs.into_iter()
                                                            .map(|s| (s.vk_name.clone(), s))
                                                            .collect();

    while !remaining.is_empty() {
        let ready: Vec<String> = remaining.values()
                                          .filter(|s| !s.members.iter().any(|m| embeds(m) && remaining.contains_key(&m.at.type_name)))
                                          .map(|s| s.vk_name.clone())
                                          .collect();

        if ready.is_empty() {
            return Err(Error::CyclicDependency(remaining.into_iter().map(|(name, _)| name).collect()));
        }

        for name in ready {
            if let Some(s) = remaining.remove(&name) {
                out.push(s);
            }
        }
    }

    Ok(out)
}

/// Whether a member stores its type inline. Pointers don't, fixed-size arrays do.
fn embeds(member: &CppMember) -> bool {
    !member.at.is_pointer || member.at.is_array
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generator::analyzed::TypeDescriptor;
    use crate::generator::converter::Converter;
    use crate::generator::model::Protect;

    fn member(name: &str, typ: &str, extra: &str) -> CppMember {
        CppMember {
            name: name.to_owned(),
            typ: typ.to_owned(),
            vk_type: typ.to_owned(),
            at: TypeDescriptor::analyze(name, typ, extra).unwrap(),
            converter: Converter::PassThrough
        }
    }

    fn record(vk_name: &str, members: Vec<CppMember>) -> CppStruct {
        CppStruct {
            protect: Protect::default(),
            name: vk_name[2..].to_owned(),
            vk_name: vk_name.to_owned(),
            type_name: String::new(),
            has_stype: false,
            read_only: false,
            is_union: false,
            members: members
        }
    }

    fn unordered() -> Vec<CppStruct> {
        vec![
            record("VkRect2D", vec![member("offset", "VkOffset2D", ""), member("extent", "VkExtent2D", "")]),
            record("VkClearRect", vec![member("rect", "VkRect2D", ""), member("baseArrayLayer", "uint32_t", "")]),
            record("VkExtent2D", vec![member("width", "uint32_t", "")]),
            record("VkImageBlit", vec![member("srcOffsets", "VkOffset3D", "[2]")]),
            record("VkOffset3D", vec![member("x", "int32_t", "")]),
            record("VkOffset2D", vec![member("x", "int32_t", "")]),
            // Pointers are not ordering dependencies
            record("VkAInfo", vec![member("pRect", "VkRect2D", "const *")]),
        ]
    }

    fn names(structs: &[CppStruct]) -> Vec<&str> {
        structs.iter().map(|s| &s.vk_name[..]).collect()
    }

    #[test]
    fn dependencies_come_first() {
        let sorted = sort_structs(unordered()).unwrap();
        assert_eq!(names(&sorted), vec![
            "VkAInfo", "VkExtent2D", "VkOffset2D", "VkOffset3D",
            "VkImageBlit", "VkRect2D",
            "VkClearRect"
        ]);

        for (i, s) in sorted.iter().enumerate() {
            for m in s.members.iter().filter(|m| embeds(m)) {
                if let Some(j) = sorted.iter().position(|d| d.vk_name == m.at.type_name) {
                    assert!(j < i, "{} must come before {}", m.at.type_name, s.vk_name);
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let mut reversed = unordered();
        reversed.reverse();
        let a = sort_structs(unordered()).unwrap();
        let b = sort_structs(reversed).unwrap();
        assert_eq!(names(&a), names(&b));
    }

    #[test]
    fn cycles_are_errors() {
        let structs = vec![
            record("VkA", vec![member("b", "VkB", "")]),
            record("VkB", vec![member("c", "VkC", "[2]")]),
            record("VkC", vec![member("a", "VkA", "")]),
            record("VkD", vec![member("x", "uint32_t", "")]),
        ];

        match sort_structs(structs) {
            Err(Error::CyclicDependency(names)) => assert_eq!(names, vec!["VkA", "VkB", "VkC"]),
            other                              => panic!("expected a cycle, got {:?}", other.map(|s| s.len()))
        }
    }

    #[test]
    fn pointer_cycles_are_fine() {
        let structs = vec![
            record("VkA", vec![member("pB", "VkB", "*")]),
            record("VkB", vec![member("pA", "VkA", "const *")]),
        ];
        assert_eq!(names(&sort_structs(structs).unwrap()), vec!["VkA", "VkB"]);
    }
}
