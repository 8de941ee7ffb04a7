//! Conversions between wrapper values and the native Vulkan values they stand for.
//!
//! Every struct member and command parameter gets one [`Converter`], chosen once while the model
//! is built. The renderer then asks it for three kinds of expressions:
//!
//! * [`Converter::native_arg`]: the argument passed to the C function at a call site,
//! * [`Converter::assign_native`]: the statement storing a wrapper value into a C struct field,
//! * [`Converter::read_native`]: the statement returning a C struct field as a wrapper value.

use std::collections::HashMap;

use super::analyzed::TypeDescriptor;

/// The wrapper and native spellings of the type a converter casts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastNames {
    pub cpp_name: String,
    pub vk_name: String
}

impl CastNames {
    pub fn new<C: Into<String>, V: Into<String>>(cpp_name: C, vk_name: V) -> CastNames {
        CastNames {
            cpp_name: cpp_name.into(),
            vk_name: vk_name.into()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Converter {
    /// Numbers, booleans, sizes and everything else that is the same type on both sides
    PassThrough,
    /// Enumerations
    StaticCast(CastNames),
    /// Bitmasks wrapped in `vk::Flags<>`
    BitMask(CastNames),
    /// Handle classes
    Handle(CastNames),
    /// Struct wrapper classes, which are layout compatible with the C structs
    Reinterpret(CastNames),
    /// Fixed-size array members of structs
    Array(CastNames)
}

impl Converter {
    /// Picks the converter for a declaration described by `at`.
    ///
    /// `registered` maps native type names to the converter of the entity they name. `is_member`
    /// is set for struct members, the only place fixed-size arrays are copied element-wise.
    /// Anything unknown passes through unchanged.
    pub fn select(at: &TypeDescriptor, registered: &HashMap<String, Converter>, is_member: bool) -> Converter {
        if is_member && at.is_array {
            return Converter::Array(CastNames::new(super::names::convert_vk_name(&at.type_name), &at.type_name[..]));
        }

        match registered.get(&at.type_name) {
            Some(conv) => conv.clone(),
            None       => {
                log::debug!("no converter for `{}`, passing through", at.type_name);
                Converter::PassThrough
            }
        }
    }

    /// The expression that passes `src` to a native function.
    pub fn native_arg(&self, at: &TypeDescriptor, src: &str) -> String {
        use self::Converter::*;
        match *self {
            PassThrough                 |
            Array(_)                   => src.to_owned(),
            StaticCast(ref n)           |
            BitMask(ref n)              |
            Handle(ref n)              =>
                if at.is_pointer {
                    reinterpret(&n.vk_name, at, src)
                } else {
                    static_cast(&n.vk_name, src)
                },
            Reinterpret(ref n)         =>
                if reinterprets(at) {
                    reinterpret(&n.vk_name, at, src)
                } else {
                    static_cast(&n.vk_name, src)
                }
        }
    }

    /// The statement that stores `src` into the native field `dst`.
    pub fn assign_native(&self, at: &TypeDescriptor, src: &str, dst: &str) -> String {
        use self::Converter::*;
        match *self {
            PassThrough => format!("{} = {};", dst, src),
            Array(ref n) => format!("std::memcpy({}, {}, {} * sizeof({}));", dst, src, at.len_expr(), n.vk_name),
            _           => format!("{} = {};", dst, self.native_arg(at, src))
        }
    }

    /// The statement that returns the native field `src` as a wrapper value.
    pub fn read_native(&self, at: &TypeDescriptor, src: &str) -> String {
        use self::Converter::*;
        let expr = match *self {
            PassThrough                 => src.to_owned(),
            Array(ref n)               => format!("reinterpret_cast<const {}*>({})", n.cpp_name, src),
            StaticCast(ref n)          =>
                if at.is_pointer {
                    reinterpret(&n.cpp_name, at, src)
                } else {
                    static_cast(&n.cpp_name, src)
                },
            BitMask(ref n)              |
            Handle(ref n)              =>
                if at.is_pointer {
                    reinterpret(&n.cpp_name, at, src)
                } else {
                    format!("{}({})", n.cpp_name, src)
                },
            Reinterpret(ref n)         =>
                if reinterprets(at) {
                    reinterpret(&n.cpp_name, at, src)
                } else {
                    static_cast(&n.cpp_name, src)
                }
        };
        format!("return {};", expr)
    }
}

/// A pointer cast only makes sense when there is a pointer; plain (or merely `const`) values are
/// converted like enums.
fn reinterprets(at: &TypeDescriptor) -> bool {
    !at.is_blank && at.is_pointer
}

fn static_cast(to: &str, src: &str) -> String {
    format!("static_cast<{}>({})", to, src)
}

fn reinterpret(to: &str, at: &TypeDescriptor, src: &str) -> String {
    format!("reinterpret_cast<{}{}{}>({})", at.prefix, to, at.suffix, src)
}
