//! Sub-expression lookup by dotted path.
//!
//! Segments name call arguments or struct fields; decimal segments index
//! arrays, vectors and positional arguments. Temporary references are
//! followed transparently, so callers never see `temporary[i]` as a result.

use matbox_core::{DirectCall, Expression, Type, TypeFactory, Value};

use crate::material::CompiledMaterial;

#[derive(Clone, Copy)]
enum Found<'a> {
    Body,
    Expression(&'a Expression),
    Value(&'a Value),
}

impl CompiledMaterial {
    /// Sub-expression at `path`; the empty path yields the body.
    pub fn lookup_sub_expression(&self, path: &str) -> Option<Expression> {
        self.walk(path).map(|found| self.materialize(found))
    }

    /// Like [`lookup_sub_expression`](Self::lookup_sub_expression), also
    /// returning the static type.
    ///
    /// The type is taken from the `material` struct of `types` as long as the
    /// path stays inside it, and from the expression itself beyond that.
    pub fn lookup_sub_expression_typed(
        &self,
        path: &str,
        types: &TypeFactory,
    ) -> Option<(Expression, Type)> {
        let expr = self.lookup_sub_expression(path)?;

        let mut ty = Some(types.material());
        for seg in segments(path) {
            ty = ty.and_then(|t| match seg.parse::<usize>() {
                Ok(_) => t.element(),
                Err(_) => t.field(seg).cloned(),
            });
        }
        let ty = ty.unwrap_or_else(|| expr.ty());
        Some((expr, ty))
    }

    fn walk(&self, path: &str) -> Option<Found<'_>> {
        let mut cur = Found::Body;
        for seg in segments(path) {
            cur = match cur {
                Found::Body => Found::Expression(self.follow(call_argument(self.body_ref(), seg)?)),
                Found::Expression(e) => match self.follow(e) {
                    Expression::Call(call) => {
                        Found::Expression(self.follow(call_argument(call, seg)?))
                    }
                    Expression::Constant(v) => Found::Value(member(v, seg)?),
                    Expression::Parameter { .. } | Expression::Temporary { .. } => return None,
                },
                Found::Value(v) => Found::Value(member(v, seg)?),
            };
        }
        Some(cur)
    }

    /// Resolve temporary references, at most one hop per temporary.
    fn follow<'a>(&'a self, mut expr: &'a Expression) -> &'a Expression {
        for _ in 0..self.temporary_count() {
            let Expression::Temporary { index, .. } = expr else {
                break;
            };
            match self.temporary(*index) {
                Some(t) => expr = t,
                None => break,
            }
        }
        expr
    }

    fn materialize(&self, found: Found<'_>) -> Expression {
        match found {
            Found::Body => Expression::Call(self.body_ref().clone()),
            Found::Expression(e) => e.clone(),
            Found::Value(v) => Expression::Constant(v.clone()),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn call_argument<'a>(call: &'a DirectCall, seg: &str) -> Option<&'a Expression> {
    call.argument(seg).or_else(|| {
        seg.parse::<usize>()
            .ok()
            .and_then(|i| call.arguments.get(i))
    })
}

fn member<'a>(value: &'a Value, seg: &str) -> Option<&'a Value> {
    match seg.parse::<usize>() {
        Ok(i) => value.element(i),
        Err(_) => value.field(seg),
    }
}
