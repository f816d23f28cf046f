use serde_json::json;

use crate::db::Table;
use crate::error::Result;
use crate::models::ListParams;
use crate::output::{self, text::TextView};
use crate::store::{Repository, Store};

pub(crate) fn list<R: Table + TextView>(
    store: &Store,
    params: &ListParams,
    json_output: bool,
) -> Result<i32> {
    let items: Vec<R> = Repository::<R>::query(store, params)?;
    if json_output {
        output::json::print(&output::json::success_of(&items)?);
    } else {
        output::text::print_list(&items, &format!("No {} found.", R::COLLECTION));
    }
    Ok(0)
}

pub(crate) fn show<R: Table + TextView>(store: &Store, id: i64, json_output: bool) -> Result<i32> {
    let item: R = Repository::<R>::get(store, id)?;
    print_record(&item, json_output, None)
}

pub(crate) fn create<R: Table + TextView>(
    store: &Store,
    draft: R::Draft,
    json_output: bool,
) -> Result<i32> {
    let item: R = Repository::<R>::create(store, draft)?;
    print_record(&item, json_output, Some("Created"))
}

pub(crate) fn update<R: Table + TextView>(
    store: &Store,
    id: i64,
    patch: R::Patch,
    json_output: bool,
) -> Result<i32> {
    let item: R = Repository::<R>::update(store, id, patch)?;
    print_record(&item, json_output, Some("Updated"))
}

pub(crate) fn delete<R: Table + TextView>(store: &Store, id: i64, json_output: bool) -> Result<i32> {
    let removed: R = Repository::<R>::delete(store, id)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "message": format!("{} deleted", R::LABEL),
            "id": id,
        })));
    } else {
        println!("Deleted {} {}", R::LABEL, removed.row());
    }
    Ok(0)
}

fn print_record<R: Table + TextView>(item: &R, json_output: bool, verb: Option<&str>) -> Result<i32> {
    if json_output {
        output::json::print(&output::json::success_of(item)?);
    } else {
        if let Some(verb) = verb {
            println!("{verb} {}", R::LABEL);
        }
        output::text::print_detail(item);
    }
    Ok(0)
}
