use std::path::Path;

use serde_json::json;

use super::commands::MemberCommands;
use super::{finish, from_flags, list_params, open_store, resource};
use crate::error::Result;
use crate::models::{Member, MemberDraft};

pub fn run(cmd: MemberCommands, config_path: &Path, json_output: bool) -> i32 {
    finish(run_inner(cmd, config_path, json_output), json_output)
}

fn run_inner(cmd: MemberCommands, config_path: &Path, json_output: bool) -> Result<i32> {
    let (_config, store) = open_store(config_path)?;
    match cmd {
        MemberCommands::Add {
            name,
            email,
            phone,
            department,
            role,
            join_date,
            status,
        } => {
            let draft: MemberDraft = from_flags(json!({
                "name": name,
                "email": email,
                "phone": phone,
                "department": department,
                "role": role,
                "joinDate": join_date,
                "status": status,
            }))?;
            resource::create::<Member>(&store, draft, json_output)
        }
        MemberCommands::List(args) => {
            let params = list_params(args.search, args.sort, args.desc, &args.filters)?;
            resource::list::<Member>(&store, &params, json_output)
        }
        MemberCommands::Show { id } => resource::show::<Member>(&store, id, json_output),
        MemberCommands::Delete { id } => resource::delete::<Member>(&store, id, json_output),
    }
}
