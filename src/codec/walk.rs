//! The structural walk shared by encoding and decoding.
//!
//! Precedence at every node: null check, enum, object shape, `?`, `[]`,
//! scalar kind, direction-specific leaf, type-table reference. Only the
//! leaves whose wire and native forms differ go through [`Direction`].

use std::collections::BTreeMap;
use std::marker::PhantomData;

use tracing::{debug, trace};

use super::error::TranscodeError;
use super::path::Path;
use super::scalar::check_scalar;
use super::Limits;
use crate::schema::{BaseType, TypeDescription, TypeName, TypeTable};
use crate::Value;

/// Leaf conversions that differ between the wire and native forms.
pub(crate) trait Direction {
    /// Label used in logs.
    const NAME: &'static str;

    fn bytes(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError>;
    fn date(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError>;
    fn datetime(path: &Path<'_>, value: &Value) -> Result<Value, TranscodeError>;
}

/// How far the walk has gone: value nesting, plus type-table hops taken
/// since it last moved into a field or element.
#[derive(Debug, Clone, Copy, Default)]
struct Depth {
    nesting: usize,
    hops: usize,
}

pub(crate) struct Walker<'t, D> {
    table: &'t TypeTable,
    limits: Limits,
    _direction: PhantomData<D>,
}

impl<'t, D: Direction> Walker<'t, D> {
    pub(crate) fn new(table: &'t TypeTable, limits: Option<&Limits>) -> Self {
        Self {
            table,
            limits: limits.copied().unwrap_or_default(),
            _direction: PhantomData,
        }
    }

    pub(crate) fn run(
        &self,
        path: &str,
        ty: &TypeDescription,
        value: &Value,
    ) -> Result<Value, TranscodeError> {
        let root = Path::root(path);
        self.walk(&root, ty, value, Depth::default()).map_err(|err| {
            debug!(direction = D::NAME, path = err.path(), error = %err, "transcode failed");
            err
        })
    }

    /// Step into the fields or elements of `path`.
    fn descend(&self, path: &Path<'_>, depth: Depth) -> Result<Depth, TranscodeError> {
        if depth.nesting >= self.limits.max_depth {
            return Err(TranscodeError::too_deep(path, self.limits.max_depth));
        }
        Ok(Depth {
            nesting: depth.nesting + 1,
            hops: 0,
        })
    }

    /// Follow a type-table reference without moving through the value.
    fn hop(&self, path: &Path<'_>, depth: Depth) -> Result<Depth, TranscodeError> {
        if depth.hops >= self.limits.max_alias_hops {
            return Err(TranscodeError::too_deep(path, self.limits.max_alias_hops));
        }
        Ok(Depth {
            hops: depth.hops + 1,
            ..depth
        })
    }

    fn walk(
        &self,
        path: &Path<'_>,
        ty: &TypeDescription,
        value: &Value,
        depth: Depth,
    ) -> Result<Value, TranscodeError> {
        match ty {
            TypeDescription::Named(name) => self.walk_named(path, name, value, depth),
            TypeDescription::Enum(literals) => {
                if literals.contains(value) {
                    Ok(value.clone())
                } else {
                    Err(TranscodeError::mismatch(path, ty, value))
                }
            }
            TypeDescription::Object(fields) => {
                if !matches!(value, Value::Object(_)) {
                    return Err(TranscodeError::mismatch(path, "object", value));
                }
                let depth = self.descend(path, depth)?;
                let mut out = BTreeMap::new();
                for (name, field_ty) in fields {
                    let field_path = path.field(name);
                    let field = self.walk(&field_path, field_ty, value.get_or_null(name), depth)?;
                    out.insert(name.clone(), field);
                }
                Ok(Value::Object(out))
            }
        }
    }

    fn walk_named(
        &self,
        path: &Path<'_>,
        name: &TypeName,
        value: &Value,
        depth: Depth,
    ) -> Result<Value, TranscodeError> {
        if value.is_null() && !name.accepts_null() {
            return Err(TranscodeError::null(path));
        }

        match name {
            TypeName::Nullable(_) if value.is_null() => Ok(Value::Null),
            TypeName::Nullable(inner) => self.walk_named(path, inner, value, depth),
            TypeName::Array(inner) => {
                let Value::Array(items) = value else {
                    return Err(TranscodeError::mismatch(path, name, value));
                };
                let depth = self.descend(path, depth)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| self.walk_named(&path.index(index), inner, item, depth))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Array)
            }
            TypeName::Base(base) => self.walk_base(path, base, value, depth),
        }
    }

    fn walk_base(
        &self,
        path: &Path<'_>,
        base: &BaseType,
        value: &Value,
        depth: Depth,
    ) -> Result<Value, TranscodeError> {
        match base {
            BaseType::Scalar(kind) => check_scalar(path, *kind, value),
            BaseType::Bytes => D::bytes(path, value),
            BaseType::Cpf | BaseType::Cnpj => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                _ => Err(TranscodeError::mismatch(path, base.name(), value)),
            },
            BaseType::Date => D::date(path, value),
            BaseType::DateTime => D::datetime(path, value),
            BaseType::Reference(reference) => {
                let resolved = self
                    .table
                    .get(reference)
                    .ok_or_else(|| TranscodeError::unknown(path, reference))?;
                trace!(name = %reference, path = %path, "resolved type reference");
                let depth = self.hop(path, depth)?;
                self.walk(path, resolved, value, depth)
            }
        }
    }
}
