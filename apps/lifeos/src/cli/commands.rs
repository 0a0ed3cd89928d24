//! # CLI Command Implementations

use crate::api::{self, AppState};
use crate::config::Config;
use chrono::NaiveDate;
use lifeos_core::services::register;
use lifeos_core::{
    AccountId, AccountScope, Clock, HabitStreak, LifeError, RedbStore, level_for_xp,
    xp_to_next_level,
};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Validate an output path: its parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, LifeError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        LifeError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(LifeError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| LifeError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), LifeError> {
    let store = RedbStore::open(&config.storage.path)?;

    println!("LifeOS Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.server.host);
    println!("  Port:       {}", config.server.port);
    println!("  Database:   {:?}", config.storage.path);
    println!("  Rate limit: {} req/s", config.security.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET  /health             - Health check");
    println!("  POST /api/auth/register  - Create an account");
    println!("  *    /api/...            - Authenticated (Bearer token)");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    api::run_server(&addr, AppState::new(store), &config.security).await
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Initialize a new database.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), LifeError> {
    if db_path.exists() {
        if !force {
            return Err(LifeError::Conflict(
                "Database already exists. Use --force to overwrite.".to_string(),
            ));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| LifeError::Io(format!("Remove {}: {}", db_path.display(), e)))?;
    }

    RedbStore::open(db_path)?;
    println!("Initialized new database at {:?}", db_path);
    Ok(())
}

// =============================================================================
// ACCOUNT COMMANDS
// =============================================================================

/// Register an account and print its token.
pub fn cmd_register(
    db_path: &Path,
    json_mode: bool,
    name: &str,
    email: &str,
) -> Result<(), LifeError> {
    let store = RedbStore::open(db_path)?;
    let registration = register(&store, &Clock::System, name, email)?;

    if json_mode {
        print_json(&json!({
            "token": registration.token,
            "account": registration.account,
        }));
    } else {
        println!("Registered account {}", registration.account.id);
        println!("  Name:  {}", registration.account.name);
        println!("  Email: {}", registration.account.email);
        println!("  Token: {}", registration.token);
        println!();
        println!("The token is shown once. Send it as 'Authorization: Bearer <token>'.");
    }
    Ok(())
}

/// Show database status.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), LifeError> {
    let store = RedbStore::open(db_path)?;
    let status = store.status()?;

    if json_mode {
        print_json(&json!({
            "database": db_path.display().to_string(),
            "accounts": status.accounts,
            "records": status.records,
            "nextId": status.next_id,
        }));
    } else {
        println!("LifeOS Database Status");
        println!("======================");
        println!("Database: {:?}", db_path);
        println!("Accounts: {}", status.accounts);
        println!("Records:  {}", status.records);
    }
    Ok(())
}

/// Show one account's progression.
pub fn cmd_profile(db_path: &Path, json_mode: bool, account: u64) -> Result<(), LifeError> {
    let store = RedbStore::open(db_path)?;
    let profile = AccountScope::new(&store, AccountId(account), &Clock::System).profile()?;

    if json_mode {
        print_json(&json!(profile));
    } else {
        println!("Account {}: {} <{}>", profile.id, profile.name, profile.email);
        println!("  Level:  {}", profile.level);
        println!(
            "  XP:     {} ({} to next level)",
            profile.xp, profile.xp_to_next_level
        );
        println!("  Streak: {} day(s)", profile.streak);
    }
    Ok(())
}

/// Export one account's data to a JSON file.
pub fn cmd_export(db_path: &Path, account: u64, output: &Path) -> Result<(), LifeError> {
    let validated_output = validate_output_path(output)?;

    let store = RedbStore::open(db_path)?;
    let export = AccountScope::new(&store, AccountId(account), &Clock::System).export()?;

    let data = serde_json::to_vec_pretty(&export)
        .map_err(|e| LifeError::Serialization(format!("JSON export: {}", e)))?;
    std::fs::write(&validated_output, &data)
        .map_err(|e| LifeError::Io(format!("Write file: {}", e)))?;

    println!(
        "Exported account {} to {:?} ({} bytes)",
        account,
        validated_output,
        data.len()
    );
    Ok(())
}

// =============================================================================
// ENGINE COMMANDS
// =============================================================================

/// Compute current and best streak for `dates` as of `today`.
pub fn cmd_streak(
    json_mode: bool,
    dates: &[NaiveDate],
    today: Option<NaiveDate>,
) -> Result<(), LifeError> {
    let today = today.unwrap_or_else(|| Clock::System.today());
    let set: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    let streak = HabitStreak::default().recompute(&set, today);

    if json_mode {
        print_json(&json!({
            "today": today,
            "dates": set.len(),
            "current": streak.current,
            "best": streak.best,
        }));
    } else {
        println!("Streak as of {}", today);
        println!("  Distinct dates: {}", set.len());
        println!("  Current:        {}", streak.current);
        println!("  Best:           {}", streak.best);
    }
    Ok(())
}

/// Show the level for an XP total.
pub fn cmd_level(json_mode: bool, xp: u64) -> Result<(), LifeError> {
    let level = level_for_xp(xp);
    let remaining = xp_to_next_level(xp);

    if json_mode {
        print_json(&json!({
            "xp": xp,
            "level": level,
            "xpToNextLevel": remaining,
        }));
    } else {
        println!("XP {} is level {} ({} to next level)", xp, level, remaining);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("life.db");

        cmd_init(&path, false).expect("first init");
        assert!(matches!(cmd_init(&path, false), Err(LifeError::Conflict(_))));
        cmd_init(&path, true).expect("forced init");
    }

    #[test]
    fn forced_init_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("life.db");

        cmd_register(&path, true, "Ada", "ada@example.com").expect("register");
        assert_eq!(
            RedbStore::open(&path).expect("open").status().expect("status").accounts,
            1
        );

        cmd_init(&path, true).expect("forced init");
        assert_eq!(
            RedbStore::open(&path).expect("open").status().expect("status").accounts,
            0
        );
    }

    #[test]
    fn export_writes_account_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("life.db");
        let out = dir.path().join("export.json");

        let account = {
            let store = RedbStore::open(&db).expect("open");
            register(&store, &Clock::System, "Ada", "ada@example.com")
                .expect("register")
                .account
                .id
        };

        cmd_export(&db, account.0, &out).expect("export");
        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).expect("read")).expect("json");
        assert_eq!(written["profile"]["email"], "ada@example.com");
        assert!(written["tasks"].as_array().is_some_and(Vec::is_empty));
    }

    #[test]
    fn export_of_unknown_account_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = dir.path().join("life.db");
        let out = dir.path().join("export.json");

        assert!(matches!(
            cmd_export(&db, 42, &out),
            Err(LifeError::NotFound { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn output_path_needs_existing_parent() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(validate_output_path(&dir.path().join("out.json")).is_ok());
        assert!(validate_output_path(&dir.path().join("missing").join("out.json")).is_err());
        assert!(validate_output_path(Path::new("relative.json")).is_ok());
    }
}
