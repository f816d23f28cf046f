use std::path::Path;

use serde_json::{json, Map, Value};

use super::commands::TaskCommands;
use super::{finish, from_flags, list_params, open_store, resource};
use crate::error::{Result, TaskboardError};
use crate::models::{Task, TaskDraft, TaskPatch};

pub fn run(cmd: TaskCommands, config_path: &Path, json_output: bool) -> i32 {
    finish(run_inner(cmd, config_path, json_output), json_output)
}

fn run_inner(cmd: TaskCommands, config_path: &Path, json_output: bool) -> Result<i32> {
    let (_config, store) = open_store(config_path)?;
    match cmd {
        TaskCommands::Add {
            title,
            description,
            status,
            priority,
            due,
            tags,
            assignee,
            project,
        } => {
            let draft: TaskDraft = from_flags(json!({
                "title": title,
                "description": description,
                "status": status,
                "priority": priority,
                "dueDate": due,
                "tags": tags,
                "assignee": assignee,
                "projectId": project,
            }))?;
            resource::create::<Task>(&store, draft, json_output)
        }
        TaskCommands::List {
            search,
            status,
            priority,
            tag,
            sort,
            desc,
            filters,
        } => {
            let mut params = list_params(search, sort, desc, &filters)?;
            for (key, value) in [("status", status), ("priority", priority), ("tag", tag)] {
                if let Some(value) = value {
                    params.insert(key.into(), value);
                }
            }
            resource::list::<Task>(&store, &params, json_output)
        }
        TaskCommands::Show { id } => resource::show::<Task>(&store, id, json_output),
        TaskCommands::Update {
            id,
            title,
            description,
            status,
            priority,
            due,
            tags,
            assignee,
            project,
            clear,
        } => {
            let mut body = Map::new();
            let mut set = |key: &str, value: Option<Value>| {
                if let Some(value) = value {
                    body.insert(key.to_string(), value);
                }
            };
            set("title", title.map(Value::from));
            set("description", description.map(Value::from));
            set("status", status.map(Value::from));
            set("priority", priority.map(Value::from));
            set("dueDate", due.map(Value::from));
            set("assignee", assignee.map(Value::from));
            set("projectId", project.map(Value::from));
            if !tags.is_empty() {
                body.insert("tags".into(), Value::from(tags));
            }
            for field in &clear {
                let (key, cleared) = match field.as_str() {
                    "description" => ("description", Value::Null),
                    "due" | "dueDate" => ("dueDate", Value::Null),
                    "tags" => ("tags", json!([])),
                    "assignee" => ("assignee", Value::Null),
                    "project" | "projectId" => ("projectId", Value::Null),
                    other => {
                        return Err(TaskboardError::validation(format!(
                            "cannot clear '{other}'; expected description, due, tags, assignee or project"
                        )))
                    }
                };
                body.insert(key.into(), cleared);
            }
            let patch: TaskPatch = from_flags(Value::Object(body))?;
            resource::update::<Task>(&store, id, patch, json_output)
        }
        TaskCommands::Delete { id } => resource::delete::<Task>(&store, id, json_output),
    }
}
