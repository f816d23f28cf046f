use std::path::Path;

use serde_json::json;

use super::commands::EventCommands;
use super::{finish, from_flags, list_params, open_store, resource};
use crate::error::Result;
use crate::models::{CalendarEvent, EventDraft};

pub fn run(cmd: EventCommands, config_path: &Path, json_output: bool) -> i32 {
    finish(run_inner(cmd, config_path, json_output), json_output)
}

fn run_inner(cmd: EventCommands, config_path: &Path, json_output: bool) -> Result<i32> {
    let (_config, store) = open_store(config_path)?;
    match cmd {
        EventCommands::Add {
            title,
            start,
            end,
            event_type,
            location,
            description,
            color,
        } => {
            let draft: EventDraft = from_flags(json!({
                "title": title,
                "start": start,
                "end": end,
                "type": event_type,
                "location": location,
                "description": description,
                "color": color,
            }))?;
            resource::create::<CalendarEvent>(&store, draft, json_output)
        }
        EventCommands::List(args) => {
            let params = list_params(args.search, args.sort, args.desc, &args.filters)?;
            resource::list::<CalendarEvent>(&store, &params, json_output)
        }
        EventCommands::Show { id } => resource::show::<CalendarEvent>(&store, id, json_output),
        EventCommands::Delete { id } => resource::delete::<CalendarEvent>(&store, id, json_output),
    }
}
