use std::path::Path;

use chrono::Local;

use super::{finish, open_store};
use crate::error::Result;
use crate::output;

pub fn run(config_path: &Path, json_output: bool) -> i32 {
    finish(run_inner(config_path, json_output), json_output)
}

fn run_inner(config_path: &Path, json_output: bool) -> Result<i32> {
    let (_config, store) = open_store(config_path)?;
    let dashboard = store.dashboard(Local::now().date_naive())?;
    if json_output {
        output::json::print(&output::json::success_of(&dashboard)?);
    } else {
        output::text::print_dashboard(&dashboard);
    }
    Ok(0)
}
