//! `thinpom rewrite` command

use anyhow::{Context, Result};

use crate::cli::RewriteArgs;
use thinpom::ops::rewrite_with_report;
use thinpom::sources::{read_manifest, render_manifest};
use thinpom::util::config::{global_overrides_path, load_overrides};
use thinpom::util::diagnostic::emit;

pub fn execute(args: RewriteArgs, color: bool) -> Result<()> {
    let global = if args.no_global {
        None
    } else {
        global_overrides_path()
    };

    let overrides = load_overrides(global.as_deref(), &args.overrides, &args.set)?;
    let manifest = read_manifest(&args.manifest, args.input_format.into())?;

    let (manifest, report) = match rewrite_with_report(manifest, &overrides) {
        Ok(result) => result,
        Err(err) => {
            emit(
                &err.to_diagnostic().with_location(&args.manifest),
                color,
            );
            std::process::exit(1);
        }
    };

    for outcome in &report.directives {
        tracing::debug!("{}: {}", outcome.key, outcome.effect);
        if let Some(warning) = outcome.warning() {
            emit(&warning, color);
        }
    }

    let output = render_manifest(&manifest, args.format.into())?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}
