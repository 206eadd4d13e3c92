// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use dotenvy::dotenv;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use zenfin::commands::{self, Session};
use zenfin::{cli, config::AppConfig, db};

fn main() -> Result<()> {
    dotenv().ok(); // env vars can be set externally

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = AppConfig::from_env()?.with_overrides(&matches);
    debug!(db = %cfg.db_path.display(), user = %cfg.user_id, "starting");
    let mut conn = db::open_or_init(&cfg.db_path)?;
    let session = Session::new(cfg.user_id.clone(), Utc::now());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("settings", sub)) => commands::settings::handle(&conn, &session, sub)?,
        Some(("income", sub)) => commands::income::handle(&conn, &session, sub)?,
        Some(("outgoing", sub)) => commands::outgoings::handle(&conn, &session, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&mut conn, &session, sub)?,
        Some(("debt", sub)) => commands::debt::handle(&mut conn, &session, sub)?,
        Some(("wishlist", sub)) => commands::wishlist::handle(&mut conn, &session, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, &session, sub)?,
        Some(("spend", sub)) => commands::spending::handle(&conn, &session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, &session, sub)?,
        Some(("notifications", sub)) => {
            commands::notifications::handle(&mut conn, &session, sub)?
        }
        Some(("advise", sub)) => {
            commands::advise::handle(&conn, &session, &cfg.advisor(), sub)?
        }
        Some(("export", sub)) => commands::exporter::handle(&conn, &session, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &session)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
