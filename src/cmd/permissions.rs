//! Permissions command - show what the current token may view

use super::GlobalOpts;
use crate::api::Permissions;
use crate::core::LedgerKind;
use anyhow::Context;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct PermissionsCommand {
    /// Exit with code 1 unless this permission is granted
    #[arg(long)]
    check: Option<String>,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PermissionsOutput<'a> {
    base_url: &'a str,
    granted: Vec<&'a str>,
    ledgers: Vec<LedgerAccess>,
}

#[derive(Debug, Serialize)]
struct LedgerAccess {
    ledger: &'static str,
    permission: &'static str,
    allowed: bool,
}

impl PermissionsCommand {
    pub fn exec(&self, global: &GlobalOpts) -> anyhow::Result<()> {
        let client = global.client()?;
        let permissions = Permissions::fetch(&client).context("fetching permissions")?;

        let ledgers: Vec<LedgerAccess> = LedgerKind::ALL
            .iter()
            .map(|kind| LedgerAccess {
                ledger: kind.display(),
                permission: kind.permission(),
                allowed: permissions.allows(kind.permission()),
            })
            .collect();

        if self.json {
            let output = PermissionsOutput {
                base_url: client.session().base_url(),
                granted: permissions.iter().collect(),
                ledgers,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            print_text(&permissions, &ledgers);
        }

        if let Some(ref wanted) = self.check {
            if !permissions.allows(wanted) {
                log::warn!("Permission {} is not granted", wanted);
                std::process::exit(1);
            }
        }
        Ok(())
    }
}

fn print_text(permissions: &Permissions, ledgers: &[LedgerAccess]) {
    println!();
    println!("LEDGER ACCESS");
    for access in ledgers {
        let mark = if access.allowed { "yes" } else { "no" };
        println!("  {:10} {:16} {}", access.ledger, access.permission, mark);
    }
    println!();

    if permissions.is_empty() {
        println!("No permissions granted");
        return;
    }
    println!("GRANTED ({})", permissions.len());
    for grant in permissions.iter() {
        println!("  {}", grant);
    }
    println!();
}
