use crate::error::{Error, Result};

/// What the text around a declaration's type says about it: `const`, pointers and array lengths.
///
/// Built from the raw suffix fragment of a member or parameter (`const *`, `[4]`, `* const*`,
/// ...). `prefix` and `suffix` are spliced verbatim around a type name to build pointer casts,
/// so `const *` on `VkFoo` yields `const VkFoo *`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// The element type, e.g. `VkOffset3D` in `VkOffset3D srcOffsets[2]`
    pub type_name: String,
    pub is_const: bool,
    /// Set for arrays too; an array is passed around as a pointer to its first element.
    pub is_pointer: bool,
    /// No suffix at all: a plain value.
    pub is_blank: bool,
    pub is_array: bool,
    /// Number of elements. Zero when the length is an API constant, see `arity_const`.
    pub arity: usize,
    /// Array length given by name, e.g. `VK_MAX_EXTENSION_NAME_SIZE`
    pub arity_const: Option<String>,
    pub prefix: String,
    pub suffix: String
}

impl TypeDescriptor {
    /// Analyzes the suffix fragment `extra` of the declaration `name` of type `type_name`.
    pub fn analyze(name: &str, type_name: &str, extra: &str) -> Result<TypeDescriptor> {
        let extra = extra.trim();
        let mut at = TypeDescriptor {
            type_name: type_name.to_owned(),
            ..TypeDescriptor::default()
        };

        if extra.is_empty() {
            at.is_blank = true;
            return Ok(at);
        }

        let unqualified = strip_const(extra);
        at.is_const = unqualified.is_some();

        if extra.ends_with(']') {
            let open = match extra.find('[') {
                Some(i) => i,
                None    => return Err(malformed(name, extra, "array length has no opening bracket"))
            };

            // `[3][4]` holds 12 elements
            let mut arity = 1usize;
            let mut consts = Vec::new();
            for len in array_dims(&extra[open..]).ok_or_else(|| malformed(name, extra, "unbalanced array brackets"))? {
                match len.parse::<usize>() {
                    Ok(n)                        => arity *= n,
                    Err(_) if is_const_name(len) => consts.push(len.to_owned()),
                    Err(_)                       => return Err(malformed(name, extra, "array length is not a non-negative integer"))
                }
            }

            if consts.is_empty() {
                at.arity = arity;
            } else {
                if arity != 1 {
                    consts.push(arity.to_string());
                }
                at.arity_const = Some(consts.join(" * "));
            }
            at.is_array = true;
        }

        if extra.contains(|c: char| c == '*' || c == '[' || c == ']') {
            at.is_pointer = true;
        }

        let mut rest = unqualified.unwrap_or(extra).to_owned();
        if at.is_const {
            at.prefix.push_str("const ");
        }
        if at.is_array {
            // Every dimension collapses into a single pointer
            if let Some(beg) = rest.find('[') {
                rest.truncate(beg);
                rest.push('*');
            }
        }
        at.suffix = rest;

        Ok(at)
    }

    /// The number of elements as it should appear in generated code.
    pub fn len_expr(&self) -> String {
        match self.arity_const {
            Some(ref c) => c.clone(),
            None        => self.arity.to_string()
        }
    }
}

/// Joins a type name and its suffix fragment into a declaration type, turning arrays into
/// pointers: (`float`, `[4]`) -> `float*`, (`char`, `const *`) -> `const char*`.
pub fn assemble_type(typ: &str, extra: &str) -> String {
    let extra = extra.trim();
    let mut out = String::with_capacity(typ.len() + extra.len() + 6);
    let extra = match strip_const(extra) {
        Some(rest) => {
            out.push_str("const ");
            rest.trim()
        }
        None       => extra
    };
    out.push_str(typ);

    if extra.starts_with('[') && extra.ends_with(']') {
        out.push('*');
    } else {
        out.push_str(extra);
    }
    out
}

/// Moves an array length written on a name (`srcOffsets[2]`) onto the suffix fragment.
///
/// Some registry revisions put the length of a couple of struct members inside `<name>`, where
/// it would otherwise go unnoticed.
pub fn relocate_name_array(name: &str, extra: &str) -> (String, String) {
    if name.ends_with(']') {
        if let Some(open) = name.find('[') {
            return (name[..open].trim_end().to_owned(), format!("{}{}", extra, &name[open..]));
        }
    }
    (name.to_owned(), extra.to_owned())
}

/// The lengths inside `[a][b]...`, or `None` if anything but bracket pairs is left.
fn array_dims(mut dims: &str) -> Option<Vec<&str>> {
    let mut out = Vec::with_capacity(2);
    while !dims.is_empty() {
        if !dims.starts_with('[') {
            return None;
        }
        let close = dims.find(']')?;
        out.push(dims[1..close].trim());
        dims = dims[close + 1..].trim_start();
    }
    Some(out)
}

fn strip_const(extra: &str) -> Option<&str> {
    if extra == "const" {
        Some("")
    } else {
        extra.strip_prefix("const ")
    }
}

fn is_const_name(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_alphabetic()) &&
    s.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn malformed(name: &str, extra: &str, reason: &'static str) -> Error {
    Error::MalformedDescriptor {
        name: name.to_owned(),
        extra: extra.to_owned(),
        reason: reason
    }
}
