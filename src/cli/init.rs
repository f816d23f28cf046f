use std::path::Path;

use serde_json::json;

use super::finish;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output;
use crate::store::Store;

pub fn run(config_path: &Path, database: bool, json_output: bool) -> i32 {
    finish(run_inner(config_path, database, json_output), json_output)
}

fn run_inner(config_path: &Path, database: bool, json_output: bool) -> Result<i32> {
    let created = !config_path.exists();
    if created {
        let config = AppConfig {
            use_database: database,
            ..AppConfig::default()
        };
        config.save(config_path)?;
        tracing::info!(path = %config_path.display(), "wrote default config");
    }
    let config = AppConfig::load(config_path)?;
    let (_store, report) = Store::init(&config)?;
    let location = if config.use_database {
        config.database_path.display().to_string()
    } else {
        config.data_dir.display().to_string()
    };

    if json_output {
        output::json::print(&output::json::success(json!({
            "config": config_path.display().to_string(),
            "configCreated": created,
            "mode": config.mode(),
            "path": location,
            "seeded": report,
        })));
    } else {
        if created {
            println!("Wrote {}", config_path.display());
        }
        println!("Initialized taskboard ({}) at {}", config.mode(), location);
        output::text::print_seed_report(&report);
    }
    Ok(0)
}
