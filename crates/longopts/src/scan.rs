//! The token scanner and the commit that follows it.

use crate::descriptor::{Arity, Mutation};
use crate::error::{OptsError, OptsResult, ScanFailure};
use crate::registry::Opts;

/// Marks a token as an option; alone, it ends option processing.
pub const OPTION_PREFIX: &str = "--";

/// Why scanning stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Termination {
    /// Ran out of tokens, or hit one that is not an option.
    EndOfInput,
    /// Consumed a bare `--`.
    ExplicitSeparator,
}

enum Step {
    Continue,
    Stop(Termination),
}

/// State of one scan call. Pending writes live here, so every call starts
/// from an empty list.
struct Scanner<'o, 'a, S> {
    opts: &'o Opts,
    args: &'a [S],
    pos: usize,
    pending: Vec<(&'o str, Mutation)>,
}

impl<'o, 'a, S: AsRef<str>> Scanner<'o, 'a, S> {
    fn new(opts: &'o Opts, args: &'a [S]) -> Self {
        Self {
            opts,
            args,
            pos: 0,
            pending: Vec::new(),
        }
    }

    fn token(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).map(|s| s.as_ref())
    }

    fn run(mut self) -> OptsResult<(Vec<(&'o str, Mutation)>, usize, Termination)> {
        loop {
            if let Step::Stop(reason) = self.step()? {
                return Ok((self.pending, self.pos, reason));
            }
        }
    }

    fn step(&mut self) -> OptsResult<Step> {
        let Some(token) = self.token(self.pos) else {
            return Ok(Step::Stop(Termination::EndOfInput));
        };
        let Some(body) = token.strip_prefix(OPTION_PREFIX) else {
            return Ok(Step::Stop(Termination::EndOfInput));
        };
        self.pos += 1;
        if body.is_empty() {
            return Ok(Step::Stop(Termination::ExplicitSeparator));
        }

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        let opts = self.opts;
        let Some(descriptor) = opts.get(name) else {
            return Err(OptsError::UnrecognizedOption {
                name: name.to_string(),
            });
        };

        let next = self.token(self.pos);
        let arg = match (descriptor.arity(), inline, next) {
            (Arity::NoArgument, inline, _) => {
                if let Some(value) = inline {
                    tracing::debug!(option = name, value, "ignoring value given to a flag");
                }
                None
            }
            (_, Some(value), _) => Some(value),
            (Arity::RequiredArgument, None, None) => {
                return Err(OptsError::MissingArgument {
                    name: name.to_string(),
                });
            }
            // Taken unconditionally, even when it looks like an option.
            (Arity::RequiredArgument, None, Some(value)) => {
                self.pos += 1;
                Some(value)
            }
            (Arity::OptionalArgument, None, Some(value)) if !value.starts_with(OPTION_PREFIX) => {
                self.pos += 1;
                Some(value)
            }
            (Arity::OptionalArgument, None, _) => None,
        };

        tracing::trace!(option = name, arg = ?arg, "matched option");
        self.pending.push((descriptor.name(), descriptor.stage(arg)?));
        Ok(Step::Continue)
    }
}

impl Opts {
    /// Process `args` against the registered options.
    ///
    /// Options are read from the front until a token that is not an option, a
    /// bare `--` (which is dropped), or the end. The tokens after that point are
    /// returned in order.
    ///
    /// Slots are written only if the whole call succeeds. On failure the error
    /// carries a copy of `args` as given, and no slot has changed.
    pub fn scan<S: AsRef<str>>(&self, args: &[S]) -> Result<Vec<String>, ScanFailure> {
        self.validate()
            .map_err(|error| ScanFailure::new(error, args))?;

        let (pending, consumed, reason) = Scanner::new(self, args)
            .run()
            .map_err(|error| {
                tracing::debug!(error = %error, "argument scan failed");
                ScanFailure::new(error, args)
            })?;

        tracing::debug!(
            options = pending.len(),
            consumed,
            reason = ?reason,
            "argument scan finished"
        );
        commit(pending).map_err(|error| {
            tracing::debug!(error = %error, "commit refused");
            ScanFailure::new(error, args)
        })?;

        Ok(args[consumed..]
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect())
    }
}

/// Apply every pending write, or none of them.
///
/// All targets are checked before the first write, so a slot the caller still
/// borrows fails the scan instead of panicking halfway through.
fn commit(pending: Vec<(&str, Mutation)>) -> OptsResult<()> {
    if let Some((name, _)) = pending.iter().find(|(_, m)| m.is_blocked()) {
        return Err(OptsError::SlotBorrowed {
            name: name.to_string(),
        });
    }
    for (_, mutation) in pending {
        mutation.apply();
    }
    Ok(())
}
