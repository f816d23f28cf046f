use std::path::Path;

use serde_json::json;

use super::commands::ProjectCommands;
use super::{finish, from_flags, list_params, open_store, resource};
use crate::error::Result;
use crate::models::{Project, ProjectDraft};

pub fn run(cmd: ProjectCommands, config_path: &Path, json_output: bool) -> i32 {
    finish(run_inner(cmd, config_path, json_output), json_output)
}

fn run_inner(cmd: ProjectCommands, config_path: &Path, json_output: bool) -> Result<i32> {
    let (_config, store) = open_store(config_path)?;
    match cmd {
        ProjectCommands::Add {
            name,
            description,
            start,
            end,
            status,
            priority,
            budget,
            progress,
            manager,
            team,
        } => {
            let draft: ProjectDraft = from_flags(json!({
                "name": name,
                "description": description,
                "startDate": start,
                "endDate": end,
                "status": status,
                "priority": priority,
                "budget": budget,
                "progress": progress,
                "manager": manager,
                "team": team,
            }))?;
            resource::create::<Project>(&store, draft, json_output)
        }
        ProjectCommands::List(args) => {
            let params = list_params(args.search, args.sort, args.desc, &args.filters)?;
            resource::list::<Project>(&store, &params, json_output)
        }
        ProjectCommands::Show { id } => resource::show::<Project>(&store, id, json_output),
        ProjectCommands::Delete { id } => resource::delete::<Project>(&store, id, json_output),
    }
}
