//! Print the role → permission table

use anyhow::Result;
use clap::Parser;
use serde_json::{json, Map, Value};

use showcase_core::roles::{role_rights, ROLES};

#[derive(Parser, Debug)]
pub struct RolesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run_roles(args: RolesArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&roles_json())?);
        return Ok(());
    }

    for role in ROLES {
        let rights: Vec<&str> = role_rights(*role).iter().map(|p| p.as_str()).collect();
        if rights.is_empty() {
            println!("{:<6} (none)", role.as_str());
        } else {
            println!("{:<6} {}", role.as_str(), rights.join(", "));
        }
    }
    Ok(())
}

fn roles_json() -> Value {
    let table: Map<String, Value> = ROLES
        .iter()
        .map(|role| (role.to_string(), json!(role_rights(*role))))
        .collect();
    Value::Object(table)
}
