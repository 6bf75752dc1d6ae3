//! Human-readable rendering of values and expressions.
//!
//! Calls render one argument per line, indented by two spaces per level.
//! Resource values show their store name when a transaction is supplied.

use std::fmt::Write as _;

use crate::colors::Colors;
use crate::expr::{DirectCall, Expression, ExpressionList};
use crate::store::Transaction;
use crate::value::{ResourceRef, Value, ValueList};

/// Renders values and expressions into a string buffer.
pub struct Dumper<'a> {
    transaction: Option<&'a dyn Transaction>,
    colors: Colors,
}

impl<'a> Dumper<'a> {
    pub fn new(transaction: Option<&'a dyn Transaction>, colors: Colors) -> Self {
        Self {
            transaction,
            colors,
        }
    }

    pub fn value(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value);
        out
    }

    pub fn expression(&self, expr: &Expression) -> String {
        let mut out = String::new();
        self.write_expression(&mut out, expr, 0);
        out
    }

    pub fn call(&self, call: &DirectCall) -> String {
        let mut out = String::new();
        self.write_call(&mut out, call, 0);
        out
    }

    /// One `index: name = value` line per entry.
    pub fn value_list(&self, list: &ValueList) -> String {
        let c = &self.colors;
        let mut out = String::new();
        for (i, (name, value)) in list.iter().enumerate() {
            write!(out, "{}{i}:{} {}{name}{} = ", c.dim, c.reset, c.blue, c.reset).unwrap();
            self.write_value(&mut out, value);
            out.push('\n');
        }
        out
    }

    /// One `index: name = expression` entry per element.
    pub fn expression_list(&self, list: &ExpressionList) -> String {
        let c = &self.colors;
        let mut out = String::new();
        for (i, (name, expr)) in list.iter().enumerate() {
            write!(out, "{}{i}:{} {}{name}{} = ", c.dim, c.reset, c.blue, c.reset).unwrap();
            self.write_expression(&mut out, expr, 0);
            out.push('\n');
        }
        out
    }

    fn write_value(&self, out: &mut String, value: &Value) {
        let c = &self.colors;
        match value {
            Value::Bool(b) => write!(out, "{}{b}{}", c.green, c.reset).unwrap(),
            Value::Int(i) => write!(out, "{}{i}{}", c.green, c.reset).unwrap(),
            Value::Enum { type_name, value } => {
                write!(out, "{type_name}({}{value}{})", c.green, c.reset).unwrap()
            }
            Value::Float(f) => write!(out, "{}{f:?}{}", c.green, c.reset).unwrap(),
            Value::Double(d) => write!(out, "{}{d:?}{}", c.green, c.reset).unwrap(),
            Value::String(s) => write!(out, "{}{s:?}{}", c.green, c.reset).unwrap(),
            Value::Vector(items) | Value::Matrix(items) => {
                write!(out, "{}", value.ty()).unwrap();
                self.write_tuple(out, items);
            }
            Value::Color([r, g, b]) => write!(
                out,
                "color({}{r:?}{}, {}{g:?}{}, {}{b:?}{})",
                c.green, c.reset, c.green, c.reset, c.green, c.reset
            )
            .unwrap(),
            Value::Array { items, .. } => {
                write!(out, "{}", value.ty()).unwrap();
                self.write_tuple(out, items);
            }
            Value::Struct { ty, fields } => {
                write!(out, "{}(", ty.name).unwrap();
                for (i, ((name, _), field)) in ty.fields.iter().zip(fields).enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write!(out, "{}{name}{}: ", c.blue, c.reset).unwrap();
                    self.write_value(out, field);
                }
                out.push(')');
            }
            Value::Texture(r) | Value::LightProfile(r) | Value::BsdfMeasurement(r) => {
                write!(out, "{}(", value.ty()).unwrap();
                self.write_resource(out, r);
                out.push(')');
            }
            Value::InvalidDf(ty) => write!(out, "{ty}()").unwrap(),
        }
    }

    fn write_tuple(&self, out: &mut String, items: &[Value]) {
        out.push('(');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_value(out, item);
        }
        out.push(')');
    }

    fn write_resource(&self, out: &mut String, r: &ResourceRef) {
        if !r.tag.is_valid() {
            return;
        }
        let c = &self.colors;
        write!(out, "{}{}{}", c.dim, r.tag, c.reset).unwrap();
        if let Some(name) = self.transaction.and_then(|t| t.tag_to_name(r.tag)) {
            write!(out, " {}{name:?}{}", c.green, c.reset).unwrap();
        }
    }

    fn write_expression(&self, out: &mut String, expr: &Expression, depth: usize) {
        let c = &self.colors;
        match expr {
            Expression::Constant(v) => self.write_value(out, v),
            Expression::Parameter { index, .. } => {
                write!(out, "{}parameter[{index}]{}", c.dim, c.reset).unwrap()
            }
            Expression::Temporary { index, .. } => {
                write!(out, "{}temporary[{index}]{}", c.dim, c.reset).unwrap()
            }
            Expression::Call(call) => self.write_call(out, call, depth),
        }
    }

    fn write_call(&self, out: &mut String, call: &DirectCall, depth: usize) {
        let c = &self.colors;
        write!(out, "{}{}{}(", c.blue, call.definition, c.reset).unwrap();
        if call.arguments.is_empty() {
            out.push(')');
            return;
        }
        out.push('\n');
        let count = call.arguments.len();
        for (i, (name, arg)) in call.arguments.iter().enumerate() {
            indent(out, depth + 1);
            write!(out, "{name}: ").unwrap();
            self.write_expression(out, arg, depth + 1);
            if i + 1 < count {
                out.push(',');
            }
            out.push('\n');
        }
        indent(out, depth);
        out.push(')');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
