//! Config subcommand for cliplog.

use std::path::Path;

use cliplog_config::{ConfigLoader, ConfigValidator};

/// Handle the check-config subcommand.
pub(crate) fn handle_check_config(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    let result = ConfigValidator::validate(&config);

    println!("Configuration: {}", path.display());
    println!("  Sink:     {:?}", config.sink.kind);
    if let Some(sink_path) = &config.sink.path {
        println!("  Output:   {}", sink_path.display());
    }
    if config.gate.required_context.is_empty() {
        println!("  Gate:     (none)");
    } else {
        println!("  Gate:     {}", config.gate.required_context.join(", "));
    }

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    result.into_result()?;
    println!("Configuration is valid");
    Ok(())
}
