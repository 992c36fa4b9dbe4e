//! Scanning a full `argv` (program name first).

use crate::error::ScanFailure;
use crate::registry::Opts;

impl Opts {
    /// Scan `argv[1..]` and return `argv[0]` followed by the remaining tokens.
    ///
    /// On failure the returned [`ScanFailure::args`] is the whole `argv`,
    /// program name included, so callers can keep using it unchanged.
    pub fn process_args<S: AsRef<str>>(&self, argv: &[S]) -> Result<Vec<String>, ScanFailure> {
        let Some((program, args)) = argv.split_first() else {
            return self.scan(argv);
        };
        let program = program.as_ref();
        tracing::debug!(program, args = args.len(), "processing arguments");

        match self.scan(args) {
            Ok(rest) => {
                let mut out = Vec::with_capacity(rest.len() + 1);
                out.push(program.to_string());
                out.extend(rest);
                Ok(out)
            }
            Err(failure) => Err(ScanFailure::new(failure.error, argv)),
        }
    }

    /// [`Opts::process_args`] over the current process arguments.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    pub fn process_env_args(&self) -> Result<Vec<String>, ScanFailure> {
        let argv: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.process_args(&argv)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::OptsError;
    use crate::registry::Opts;
    use crate::slot::Slot;

    #[test]
    fn program_name_is_kept() {
        let simple = Slot::new(false);
        let strings = Slot::new(Vec::<String>::new());
        let optional = Slot::new(17i64);
        let argv = Opts::new()
            .simple_option("simple", &simple)
            .string_array_option("string", &strings)
            .optional_int_option("optional", &optional, 23)
            .process_args(&[
                "command",
                "--simple",
                "--string=aValue",
                "--string",
                "otherValue",
                "--optional",
                "--",
                "additional",
                "arguments",
            ])
            .unwrap();
        assert!(simple.get());
        assert_eq!(strings.get(), ["aValue", "otherValue"]);
        assert_eq!(optional.get(), 23);
        assert_eq!(argv, ["command", "additional", "arguments"]);
    }

    #[test]
    fn failure_returns_whole_argv() {
        let value = Slot::new(String::new());
        let failure = Opts::new()
            .string_option("string", &value)
            .process_args(&["command", "--string"])
            .unwrap_err();
        assert!(matches!(failure.error, OptsError::MissingArgument { .. }));
        assert_eq!(failure.args, ["command", "--string"]);
        assert!(value.get().is_empty());
    }

    #[test]
    fn empty_argv() {
        let argv = Opts::new().process_args::<String>(&[]).unwrap();
        assert!(argv.is_empty());
    }
}
