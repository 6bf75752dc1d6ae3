//! Text rendering of a target code artifact.

use std::fmt::{self, Write as _};

use matbox_core::Colors;

use crate::function::PrototypeLanguage;
use crate::tables::{ResourceTable, TableEntry};
use crate::target_code::TargetCode;

impl TargetCode {
    /// Catalog, tables, data segments and argument block slots.
    ///
    /// Table index 0 is reserved and not listed.
    pub fn dump(&self, colors: Colors) -> String {
        let c = &colors;
        let mut out = String::new();

        if self.is_native() {
            writeln!(out, "Code: native").unwrap();
        } else {
            writeln!(out, "Code: source, {} bytes", self.code_size()).unwrap();
        }
        writeln!(out, "Render state usage: {}", self.render_state_usage()).unwrap();

        out.push_str("Code segments:\n");
        for i in 0..self.code_segment_count() {
            let Some(segment) = self.code_segment(i) else { continue };
            writeln!(
                out,
                "  {}{i}:{} {}{}{} ({} bytes)",
                c.dim,
                c.reset,
                c.blue,
                segment.description,
                c.reset,
                segment.code.len()
            )
            .unwrap();
        }

        out.push_str("Functions:\n");
        for (i, f) in self.functions.iter().enumerate() {
            write!(
                out,
                "  {}{i}:{} {}{}{} [{}]",
                c.dim,
                c.reset,
                c.blue,
                f.name(),
                c.reset,
                f.kind()
            )
            .unwrap();
            if let Some(block) = f.argument_block_index() {
                write!(out, " block {block}").unwrap();
            }
            out.push('\n');
            for lang in PrototypeLanguage::ALL {
                if let Some(proto) = f.prototype(lang) {
                    writeln!(out, "    {lang}: {}{proto}{}", c.green, c.reset).unwrap();
                }
            }
        }

        out.push_str("Textures:\n");
        for (i, t) in self.textures().iter().enumerate().skip(1) {
            writeln!(
                out,
                "  {}{i}:{} {}\"{}\"{} {}",
                c.dim,
                c.reset,
                c.green,
                t.name,
                c.reset,
                t.shape.type_name()
            )
            .unwrap();
        }
        write_table(&mut out, c, "Light profiles", self.light_profiles());
        write_table(&mut out, c, "Bsdf measurements", self.bsdf_measurements());
        write_table(&mut out, c, "String constants", self.string_constants());

        out.push_str("Data segments:\n");
        for i in 0..self.ro_data_segment_count() {
            let Some(segment) = self.ro_data_segment(i) else { continue };
            writeln!(
                out,
                "  {}{i}:{} {}{}{} ({} bytes)",
                c.dim,
                c.reset,
                c.blue,
                segment.name(),
                c.reset,
                segment.len()
            )
            .unwrap();
        }

        out.push_str("Argument blocks:\n");
        for i in 0..self.argument_block_count() {
            let Some(layout) = self.argument_block_layout(i) else { continue };
            let state = match self.argument_block(i) {
                Some(_) => "packed",
                None => "empty",
            };
            writeln!(
                out,
                "  {}{i}:{} {} bytes, {} arguments, {state}",
                c.dim,
                c.reset,
                layout.size(),
                layout.num_elements()
            )
            .unwrap();
        }
        out
    }
}

fn write_table<E: TableEntry>(out: &mut String, c: &Colors, title: &str, table: &ResourceTable<E>) {
    writeln!(out, "{title}:").unwrap();
    for (i, e) in table.iter().enumerate().skip(1) {
        writeln!(out, "  {}{i}:{} {}\"{}\"{}", c.dim, c.reset, c.green, e.name(), c.reset)
            .unwrap();
    }
}

impl fmt::Debug for TargetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetCode")
            .field("native", &self.is_native())
            .field("code_size", &self.code_size())
            .field("functions", &self.callable_function_count())
            .field("argument_blocks", &self.argument_block_count())
            .finish_non_exhaustive()
    }
}
