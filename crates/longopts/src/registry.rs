//! The option table and its registration builder.

use indexmap::IndexMap;

use crate::descriptor::{Descriptor, Scalar, Target};
use crate::error::{OptsError, OptsResult};
use crate::slot::Slot;

/// Prefix that turns a boolean option name into its negation.
pub const NEGATION_PREFIX: &str = "no";

/// The negated form of `name` (`verbose` => `noverbose`).
pub fn negated_name(name: &str) -> String {
    format!("{NEGATION_PREFIX}{name}")
}

/// Whether `a` and `b` differ only by a leading `no`.
pub fn is_negated_pair(a: &str, b: &str) -> bool {
    a.strip_prefix(NEGATION_PREFIX) == Some(b) || b.strip_prefix(NEGATION_PREFIX) == Some(a)
}

/// A set of `--name` options bound to caller slots.
///
/// Registration calls chain by value. The first registration error is kept and
/// reported by [`Opts::validate`] (and therefore by every scan); the offending
/// descriptor is not stored.
#[derive(Debug, Clone, Default)]
pub struct Opts {
    error: Option<OptsError>,
    descriptors: IndexMap<String, Descriptor>,
}

impl Opts {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(mut self, name: impl Into<String>, target: Target) -> Self {
        let name = name.into();
        if self.descriptors.contains_key(&name) {
            tracing::debug!(option = %name, "duplicate option name");
            if self.error.is_none() {
                self.error = Some(OptsError::DuplicateName { name });
            }
            return self;
        }
        let descriptor = Descriptor::new(name.clone(), target);
        self.descriptors.insert(name, descriptor);
        self
    }

    /// `--name` sets `slot` to true.
    pub fn simple_option(self, name: impl Into<String>, slot: &Slot<bool>) -> Self {
        self.add(
            name,
            Target::Flag {
                slot: slot.clone(),
                value: true,
            },
        )
    }

    /// `--name` sets `slot` to true, `--noname` sets it to false.
    pub fn negatable_option(self, name: impl Into<String>, slot: &Slot<bool>) -> Self {
        let name = name.into();
        let negated = negated_name(&name);
        self.add(
            name,
            Target::Flag {
                slot: slot.clone(),
                value: true,
            },
        )
        .add(
            negated,
            Target::Flag {
                slot: slot.clone(),
                value: false,
            },
        )
    }

    /// Every `--name` adds one to `slot`.
    pub fn counting_option(self, name: impl Into<String>, slot: &Slot<i64>) -> Self {
        self.add(name, Target::Count(slot.clone()))
    }

    /// `--name=val` or `--name val` stores `val`.
    pub fn int_option(self, name: impl Into<String>, slot: &Slot<i64>) -> Self {
        self.add(name, Target::Int(Scalar::required(slot)))
    }

    /// Like [`Opts::int_option`], but a bare `--name` stores `default`.
    ///
    /// "Bare" means followed by another option, by `--`, or by nothing.
    pub fn optional_int_option(
        self,
        name: impl Into<String>,
        slot: &Slot<i64>,
        default: i64,
    ) -> Self {
        self.add(name, Target::Int(Scalar::optional(slot, default)))
    }

    /// Every `--name=val` or `--name val` appends `val`.
    pub fn int_array_option(self, name: impl Into<String>, slot: &Slot<Vec<i64>>) -> Self {
        self.add(name, Target::IntList(slot.clone()))
    }

    /// `--name=val` or `--name val` stores `val` as a float.
    pub fn float_option(self, name: impl Into<String>, slot: &Slot<f64>) -> Self {
        self.add(name, Target::Float(Scalar::required(slot)))
    }

    /// Like [`Opts::float_option`], but a bare `--name` stores `default`.
    pub fn optional_float_option(
        self,
        name: impl Into<String>,
        slot: &Slot<f64>,
        default: f64,
    ) -> Self {
        self.add(name, Target::Float(Scalar::optional(slot, default)))
    }

    /// Every `--name=val` or `--name val` appends `val` as a float.
    pub fn float_array_option(self, name: impl Into<String>, slot: &Slot<Vec<f64>>) -> Self {
        self.add(name, Target::FloatList(slot.clone()))
    }

    /// `--name=val` or `--name val` stores `val` verbatim, even if it starts with `--`.
    pub fn string_option(self, name: impl Into<String>, slot: &Slot<String>) -> Self {
        self.add(name, Target::Str(Scalar::required(slot)))
    }

    /// Like [`Opts::string_option`], but a bare `--name` stores `default`.
    pub fn optional_string_option(
        self,
        name: impl Into<String>,
        slot: &Slot<String>,
        default: impl Into<String>,
    ) -> Self {
        self.add(name, Target::Str(Scalar::optional(slot, default.into())))
    }

    /// Every `--name=val` or `--name val` appends `val` verbatim.
    pub fn string_array_option(self, name: impl Into<String>, slot: &Slot<Vec<String>>) -> Self {
        self.add(name, Target::StrList(slot.clone()))
    }

    /// The first registration error, if any.
    pub fn error(&self) -> Option<&OptsError> {
        self.error.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.descriptors.get(name)
    }

    /// Registered options in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.values()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Report the registration error, then any pair of options sharing a slot.
    pub fn validate(&self) -> OptsResult<()> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        self.check_conflicts()
    }

    fn check_conflicts(&self) -> OptsResult<()> {
        let defs: Vec<&Descriptor> = self.descriptors.values().collect();
        for (i, later) in defs.iter().enumerate() {
            for earlier in &defs[..i] {
                if !earlier.shares_target(later) {
                    continue;
                }
                if is_negated_pair(earlier.name(), later.name()) {
                    continue;
                }
                tracing::debug!(
                    first = earlier.name(),
                    second = later.name(),
                    slot = %later.slot_id(),
                    "options share a target"
                );
                return Err(OptsError::TargetConflict {
                    first: earlier.name().to_string(),
                    second: later.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
