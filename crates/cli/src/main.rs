mod settings;

use anyhow::{Context, Result};
use longopts::Opts;
use tracing_subscriber::{EnvFilter, fmt};

use crate::settings::{Settings, Slots};

fn main() -> Result<()> {
    init_tracing();

    let slots = Slots::default();
    let opts = slots.opts();
    let argv = opts
        .process_env_args()
        .context("invalid command-line arguments")?;
    tracing::debug!(remaining = argv.len().saturating_sub(1), "options processed");

    if slots.dump_options.get() {
        return dump_options(&opts);
    }

    let rest = argv.into_iter().skip(1).collect();
    let settings = slots.settings(rest);
    if slots.json.get() {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        print_settings(&settings);
    }

    Ok(())
}

fn print_settings(settings: &Settings) {
    println!(
        "length:{}, data:{}, verbose:{}, rest:[{}]",
        settings.length,
        settings.files,
        settings.verbose,
        settings.rest.join(" ")
    );
    if settings.debug > 0 {
        println!("debug:{}", settings.debug);
    }
    if settings.level > 0 {
        println!("level:{}", settings.level);
    }
    for define in &settings.define {
        println!("define:{define}");
    }
    println!("ratio:{}", settings.ratio);
}

fn dump_options(opts: &Opts) -> Result<()> {
    let rows: Vec<serde_json::Value> = opts
        .descriptors()
        .map(|d| {
            serde_json::json!({
                "name": d.name(),
                "arity": d.arity(),
                "kind": d.kind(),
                "shape": d.shape(),
                "default": d.default_value(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
