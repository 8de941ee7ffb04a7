use std::fmt::{self, Write};

use boolinator::Boolinator;

use crate::error::Result;
use super::GenConfig;
use super::model::{GenPreproc, Protect, CppEnum, CppStruct, CppCommand};

/// The rendered sections of the header, in the order they are emitted.
pub struct GenTypes {
    handles:  String,
    enums:    String,
    bitmasks: String,
    forward:  String,
    structs:  String,
    commands: String
}

impl GenTypes {
    pub fn new(processed: &GenPreproc) -> Result<GenTypes> {
        let mut gen_types = GenTypes {
            handles:  String::with_capacity(2usize.pow(14)),
            enums:    String::with_capacity(2usize.pow(16)),
            bitmasks: String::with_capacity(2usize.pow(15)),
            forward:  String::with_capacity(2usize.pow(12)),
            structs:  String::with_capacity(2usize.pow(18)),
            commands: String::with_capacity(2usize.pow(16))
        };

        for h in &processed.handles {
            let handles = &mut gen_types.handles;
            let explicit = (!h.type_safe).as_some("VK_EXPLICIT_HANDLE ").unwrap_or("");

            writeln!(handles)?;
            protect_begin(handles, &h.protect)?;
            write!(handles, include_str!("handle.hpp"), h.name, h.vk_name, explicit)?;
            protect_end(handles, &h.protect)?;
        }

        for e in &processed.enums {
            writeln!(gen_types.enums)?;
            write_enum(&mut gen_types.enums, e)?;
        }

        for b in &processed.bitmasks {
            let bitmasks = &mut gen_types.bitmasks;

            writeln!(bitmasks)?;
            protect_begin(bitmasks, &b.protect)?;
            write_enum(bitmasks, &b.bits)?;
            writeln!(bitmasks)?;
            write!(bitmasks, include_str!("bitmask.hpp"), b.name, b.bits.name, b.vk_name)?;
            protect_end(bitmasks, &b.protect)?;
        }

        for s in &processed.structs {
            protect_begin(&mut gen_types.forward, &s.protect)?;
            writeln!(gen_types.forward, "class {};", s.name)?;
            protect_end(&mut gen_types.forward, &s.protect)?;

            writeln!(gen_types.structs)?;
            write_struct(&mut gen_types.structs, s)?;
        }

        for c in &processed.commands {
            writeln!(gen_types.commands)?;
            write_command(&mut gen_types.commands, c)?;
        }

        Ok(gen_types)
    }

    fn len(&self) -> usize {
        self.handles.len() + self.enums.len() + self.bitmasks.len() +
        self.forward.len() + self.structs.len() + self.commands.len()
    }

    /// Writes the complete header: prelude, every section and the closing lines.
    pub fn write_header(&self, config: &GenConfig) -> Result<String> {
        let mut out = String::with_capacity(self.len() + 2usize.pow(12));

        write!(out, include_str!("header.hpp"),
               guard_begin = config.guard_begin,
               include = config.vulkan_include,
               namespace = config.namespace)?;
        for section in &[&self.handles, &self.enums, &self.bitmasks, &self.forward, &self.structs, &self.commands] {
            writeln!(out)?;
            out.push_str(section);
        }
        writeln!(out, "\n}} // namespace {}", config.namespace)?;
        if !config.guard_end.is_empty() {
            writeln!(out, "{}", config.guard_end)?;
        }

        Ok(out)
    }
}

fn protect_begin(buf: &mut String, protect: &Protect) -> fmt::Result {
    if protect.begin.is_empty() {
        Ok(())
    } else {
        writeln!(buf, "{}", protect.begin)
    }
}

fn protect_end(buf: &mut String, protect: &Protect) -> fmt::Result {
    if protect.end.is_empty() {
        Ok(())
    } else {
        writeln!(buf, "{}", protect.end)
    }
}

/// An `enum class` and its `getEnumString` overload.
fn write_enum(buf: &mut String, e: &CppEnum) -> fmt::Result {
    protect_begin(buf, &e.protect)?;

    writeln!(buf, "enum class {} {{", e.name)?;
    for v in &e.values {
        writeln!(buf, "\t{} = {},", v.name, v.vk_name)?;
    }
    writeln!(buf, "}};\n")?;

    writeln!(buf, "inline const char *getEnumString({} e)\n{{\n\tswitch (e) {{", e.name)?;
    for v in &e.values {
        writeln!(buf, "\tcase {0}::{1}: return \"{0}::{1}\";", e.name, v.name)?;
    }
    writeln!(buf, "\tdefault: return \"<invalid enum>\";\n\t}}\n}}")?;

    protect_end(buf, &e.protect)
}

fn write_struct(buf: &mut String, s: &CppStruct) -> fmt::Result {
    protect_begin(buf, &s.protect)?;

    let stype = s.has_stype.as_some_from(|| format!("\n\t\tm_struct.sType = {};", s.type_name));
    write!(buf, include_str!("struct_begin.hpp"), s.name, s.vk_name, stype.as_ref().map_or("", |t| &t[..]))?;

    for m in &s.members {
        let field = format!("m_struct.{}", m.name);
        // Getters never hand out mutable access to the storage
        let getter_const = (m.at.is_pointer && !m.typ.starts_with("const ")).as_some("const ").unwrap_or("");

        writeln!(buf)?;
        writeln!(buf, "\t{}{} {}() const\n\t{{", getter_const, m.typ, m.name)?;
        writeln!(buf, "\t\t{}\n\t}}", m.converter.read_native(&m.at, &field))?;
        if !s.read_only {
            writeln!(buf, "\t{} &{}({} {})\n\t{{", s.name, m.name, m.typ, m.name)?;
            writeln!(buf, "\t\t{}", m.converter.assign_native(&m.at, &m.name, &field))?;
            writeln!(buf, "\t\treturn *this;\n\t}}")?;
        }
    }

    write!(buf, include_str!("struct_end.hpp"), s.vk_name)?;
    protect_end(buf, &s.protect)
}

/// An inline function forwarding to the native command. `Result` return values are wrapped.
fn write_command(buf: &mut String, c: &CppCommand) -> fmt::Result {
    protect_begin(buf, &c.protect)?;

    let params = c.params.iter()
                         .map(|p| format!("{} {}", p.typ, p.name))
                         .collect::<Vec<_>>();
    let args = c.params.iter()
                       .map(|p| p.converter.native_arg(&p.at, &p.name))
                       .collect::<Vec<_>>();
    let call = format!("{}({})", c.vk_name, args.join(", "));

    writeln!(buf, "inline {} {}({})\n{{", c.ret_type, c.name, params.join(", "))?;
    match &c.ret_type[..] {
        "void"   => writeln!(buf, "\t{};", call)?,
        "Result" => writeln!(buf, "\treturn Result({});", call)?,
        _        => writeln!(buf, "\treturn {};", call)?
    }
    writeln!(buf, "}}")?;

    protect_end(buf, &c.protect)
}
