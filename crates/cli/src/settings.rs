use longopts::{Opts, Slot};
use serde::Serialize;

/// Slots for every option the demo understands, with their starting values.
pub struct Slots {
    pub length: Slot<i64>,
    pub files: Slot<String>,
    pub verbose: Slot<bool>,
    pub debug: Slot<i64>,
    pub define: Slot<Vec<String>>,
    pub level: Slot<i64>,
    pub ratio: Slot<f64>,
    pub json: Slot<bool>,
    pub dump_options: Slot<bool>,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            length: Slot::new(24),
            files: Slot::new("file.dat".to_string()),
            verbose: Slot::new(false),
            debug: Slot::new(0),
            define: Slot::default(),
            level: Slot::new(0),
            ratio: Slot::new(1.0),
            json: Slot::new(false),
            dump_options: Slot::new(false),
        }
    }
}

/// Level stored by a bare `--level`.
pub const DEFAULT_LEVEL: i64 = 1;

impl Slots {
    pub fn opts(&self) -> Opts {
        Opts::new()
            .int_option("length", &self.length)
            .string_option("files", &self.files)
            .negatable_option("verbose", &self.verbose)
            .counting_option("debug", &self.debug)
            .string_array_option("define", &self.define)
            .optional_int_option("level", &self.level, DEFAULT_LEVEL)
            .float_option("ratio", &self.ratio)
            .simple_option("json", &self.json)
            .simple_option("dump-options", &self.dump_options)
    }

    pub fn settings(&self, rest: Vec<String>) -> Settings {
        Settings {
            length: self.length.get(),
            files: self.files.get(),
            verbose: self.verbose.get(),
            debug: self.debug.get(),
            define: self.define.take(),
            level: self.level.get(),
            ratio: self.ratio.get(),
            rest,
        }
    }
}

/// Resolved option values plus the trailing arguments.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub length: i64,
    pub files: String,
    pub verbose: bool,
    pub debug: i64,
    pub define: Vec<String>,
    pub level: i64,
    pub ratio: f64,
    pub rest: Vec<String>,
}
