//! Registered options and the deferred writes they produce.

use serde::Serialize;

use crate::error::{OptsError, OptsResult};
use crate::slot::{Slot, SlotId};
use crate::value::{Decode, Value, ValueKind};

/// How many tokens after `--name` an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    NoArgument,
    /// Takes the next token unless it is missing or looks like an option;
    /// otherwise the option's default is stored.
    OptionalArgument,
    RequiredArgument,
}

/// Whether an option overwrites a single value or appends to a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    Scalar,
    Array,
}

#[derive(Debug, Clone)]
pub(crate) struct Scalar<T> {
    slot: Slot<T>,
    default: Option<T>,
}

impl<T: Decode + Clone> Scalar<T> {
    pub(crate) fn required(slot: &Slot<T>) -> Self {
        Self {
            slot: slot.clone(),
            default: None,
        }
    }

    pub(crate) fn optional(slot: &Slot<T>, default: T) -> Self {
        Self {
            slot: slot.clone(),
            default: Some(default),
        }
    }

    fn resolve(&self, name: &str, arg: Option<&str>) -> OptsResult<T> {
        match (arg, &self.default) {
            (Some(raw), _) => T::decode(raw).map_err(|source| OptsError::InvalidSyntax {
                name: name.to_string(),
                source,
            }),
            (None, Some(default)) => Ok(default.clone()),
            (None, None) => Err(OptsError::MissingArgument {
                name: name.to_string(),
            }),
        }
    }
}

/// The storage an option writes, together with how it writes it.
#[derive(Debug, Clone)]
pub(crate) enum Target {
    Flag { slot: Slot<bool>, value: bool },
    Count(Slot<i64>),
    Int(Scalar<i64>),
    Float(Scalar<f64>),
    Str(Scalar<String>),
    IntList(Slot<Vec<i64>>),
    FloatList(Slot<Vec<f64>>),
    StrList(Slot<Vec<String>>),
}

impl Target {
    fn slot_id(&self) -> SlotId {
        match self {
            Self::Flag { slot, .. } => slot.id(),
            Self::Count(slot) => slot.id(),
            Self::Int(s) => s.slot.id(),
            Self::Float(s) => s.slot.id(),
            Self::Str(s) => s.slot.id(),
            Self::IntList(slot) => slot.id(),
            Self::FloatList(slot) => slot.id(),
            Self::StrList(slot) => slot.id(),
        }
    }

    fn kind(&self) -> ValueKind {
        match self {
            Self::Flag { .. } => ValueKind::Bool,
            Self::Count(_) | Self::Int(_) | Self::IntList(_) => ValueKind::Int,
            Self::Float(_) | Self::FloatList(_) => ValueKind::Float,
            Self::Str(_) | Self::StrList(_) => ValueKind::Str,
        }
    }

    fn shape(&self) -> Shape {
        match self {
            Self::IntList(_) | Self::FloatList(_) | Self::StrList(_) => Shape::Array,
            _ => Shape::Scalar,
        }
    }

    fn arity(&self) -> Arity {
        match self {
            Self::Flag { .. } | Self::Count(_) => Arity::NoArgument,
            Self::Int(s) => scalar_arity(s),
            Self::Float(s) => scalar_arity(s),
            Self::Str(s) => scalar_arity(s),
            Self::IntList(_) | Self::FloatList(_) | Self::StrList(_) => Arity::RequiredArgument,
        }
    }

    fn default_value(&self) -> Option<Value> {
        match self {
            Self::Int(s) => s.default.map(Value::Int),
            Self::Float(s) => s.default.map(Value::Float),
            Self::Str(s) => s.default.clone().map(Value::Str),
            _ => None,
        }
    }
}

fn scalar_arity<T>(scalar: &Scalar<T>) -> Arity {
    if scalar.default.is_some() {
        Arity::OptionalArgument
    } else {
        Arity::RequiredArgument
    }
}

/// One registered `--name`.
#[derive(Debug, Clone)]
pub struct Descriptor {
    name: String,
    target: Target,
}

impl Descriptor {
    pub(crate) fn new(name: String, target: Target) -> Self {
        Self { name, target }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.target.arity()
    }

    pub fn kind(&self) -> ValueKind {
        self.target.kind()
    }

    pub fn shape(&self) -> Shape {
        self.target.shape()
    }

    pub fn slot_id(&self) -> SlotId {
        self.target.slot_id()
    }

    /// The value an optional-argument option stores when given no argument.
    pub fn default_value(&self) -> Option<Value> {
        self.target.default_value()
    }

    /// Whether both descriptors write the same slot as the same concrete type.
    pub(crate) fn shares_target(&self, other: &Descriptor) -> bool {
        self.slot_id() == other.slot_id()
            && self.kind() == other.kind()
            && self.shape() == other.shape()
    }

    /// Turn the (optional) argument token into a pending write.
    ///
    /// Nothing is stored until [`Mutation::apply`] runs.
    pub(crate) fn stage(&self, arg: Option<&str>) -> OptsResult<Mutation> {
        let name = self.name.as_str();
        let mutation = match &self.target {
            Target::Flag { slot, value } => Mutation::Flag(slot.clone(), *value),
            Target::Count(slot) => Mutation::Increment(slot.clone()),
            Target::Int(s) => Mutation::Int(s.slot.clone(), s.resolve(name, arg)?),
            Target::Float(s) => Mutation::Float(s.slot.clone(), s.resolve(name, arg)?),
            Target::Str(s) => Mutation::Str(s.slot.clone(), s.resolve(name, arg)?),
            Target::IntList(slot) => Mutation::PushInt(slot.clone(), element(name, arg)?),
            Target::FloatList(slot) => Mutation::PushFloat(slot.clone(), element(name, arg)?),
            Target::StrList(slot) => Mutation::PushStr(slot.clone(), element(name, arg)?),
        };
        Ok(mutation)
    }
}

fn element<T: Decode>(name: &str, arg: Option<&str>) -> OptsResult<T> {
    let Some(raw) = arg else {
        return Err(OptsError::MissingArgument {
            name: name.to_string(),
        });
    };
    T::decode(raw).map_err(|source| OptsError::InvalidSyntax {
        name: name.to_string(),
        source,
    })
}

/// A write recorded during a scan and applied only after the scan succeeds.
#[derive(Debug, Clone)]
pub(crate) enum Mutation {
    Flag(Slot<bool>, bool),
    Increment(Slot<i64>),
    Int(Slot<i64>, i64),
    Float(Slot<f64>, f64),
    Str(Slot<String>, String),
    PushInt(Slot<Vec<i64>>, i64),
    PushFloat(Slot<Vec<f64>>, f64),
    PushStr(Slot<Vec<String>>, String),
}

impl Mutation {
    /// Whether the target slot is borrowed by the caller and cannot be written.
    pub(crate) fn is_blocked(&self) -> bool {
        match self {
            Self::Flag(slot, _) => slot.is_borrowed(),
            Self::Increment(slot) | Self::Int(slot, _) => slot.is_borrowed(),
            Self::Float(slot, _) => slot.is_borrowed(),
            Self::Str(slot, _) => slot.is_borrowed(),
            Self::PushInt(slot, _) => slot.is_borrowed(),
            Self::PushFloat(slot, _) => slot.is_borrowed(),
            Self::PushStr(slot, _) => slot.is_borrowed(),
        }
    }

    pub(crate) fn apply(self) {
        match self {
            Self::Flag(slot, v) => slot.set(v),
            Self::Increment(slot) => slot.update(|n| *n = n.saturating_add(1)),
            Self::Int(slot, v) => slot.set(v),
            Self::Float(slot, v) => slot.set(v),
            Self::Str(slot, v) => slot.set(v),
            Self::PushInt(slot, v) => slot.update(|list| list.push(v)),
            Self::PushFloat(slot, v) => slot.update(|list| list.push(v)),
            Self::PushStr(slot, v) => slot.update(|list| list.push(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_follows_target() {
        let n = Slot::new(0i64);
        let required = Descriptor::new("n".into(), Target::Int(Scalar::required(&n)));
        let optional = Descriptor::new("m".into(), Target::Int(Scalar::optional(&n, 23)));
        let counter = Descriptor::new("v".into(), Target::Count(n.clone()));

        assert_eq!(required.arity(), Arity::RequiredArgument);
        assert_eq!(optional.arity(), Arity::OptionalArgument);
        assert_eq!(optional.default_value(), Some(Value::Int(23)));
        assert_eq!(counter.arity(), Arity::NoArgument);
        assert_eq!(counter.kind(), ValueKind::Int);
        assert_eq!(counter.shape(), Shape::Scalar);
    }

    #[test]
    fn stage_does_not_touch_the_slot() {
        let n = Slot::new(7i64);
        let d = Descriptor::new("n".into(), Target::Int(Scalar::required(&n)));

        let m = d.stage(Some("11")).unwrap();
        assert_eq!(n.get(), 7);
        m.apply();
        assert_eq!(n.get(), 11);
    }

    #[test]
    fn stage_uses_default_without_argument() {
        let s = Slot::new(String::from("before"));
        let d = Descriptor::new("s".into(), Target::Str(Scalar::optional(&s, "dflt".into())));
        d.stage(None).unwrap().apply();
        assert_eq!(s.get(), "dflt");
    }

    #[test]
    fn stage_reports_bad_tokens_with_option_name() {
        let f = Slot::new(Vec::<f64>::new());
        let d = Descriptor::new("ratio".into(), Target::FloatList(f));
        let err = d.stage(Some("abc")).unwrap_err();
        match err {
            OptsError::InvalidSyntax { name, source } => {
                assert_eq!(name, "ratio");
                assert_eq!(source.raw, "abc");
                assert_eq!(source.kind, ValueKind::Float);
            }
            other => panic!("expected InvalidSyntax, got: {other:?}"),
        }
    }

    #[test]
    fn increments_saturate() {
        let n = Slot::new(i64::MAX);
        Mutation::Increment(n.clone()).apply();
        assert_eq!(n.get(), i64::MAX);
    }

    #[test]
    fn shares_target_requires_same_type() {
        let n = Slot::new(0i64);
        let a = Descriptor::new("a".into(), Target::Int(Scalar::required(&n)));
        let b = Descriptor::new("b".into(), Target::Count(n.clone()));
        let c = Descriptor::new("c".into(), Target::Int(Scalar::required(&Slot::new(0))));
        assert!(a.shares_target(&b));
        assert!(!a.shares_target(&c));
    }
}
