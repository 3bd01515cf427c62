use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_appender::rolling;

use hourbank::config::Config;
use hourbank::{AttendanceRecord, AttendanceStore, Permission, ReconcileSummary, WeeklySchedule};

/// Canonical record set for the run. Reconciliation pushes corrected rows
/// through the store seam; `flush` rewrites the records file wholesale.
struct JsonFileStore {
    path: String,
    rows: HashMap<(u64, NaiveDate), AttendanceRecord>,
    dry_run: bool,
}

impl JsonFileStore {
    fn new(path: String, records: &[AttendanceRecord], dry_run: bool) -> Self {
        let rows = records
            .iter()
            .map(|r| ((r.user_id, r.date), r.clone()))
            .collect();
        Self {
            path,
            rows,
            dry_run,
        }
    }

    fn flush(&self) -> Result<()> {
        if self.dry_run {
            info!("Dry run, records file left untouched");
            return Ok(());
        }
        let mut all: Vec<&AttendanceRecord> = self.rows.values().collect();
        all.sort_by_key(|r| (r.user_id, r.date));
        let json = serde_json::to_string_pretty(&all)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write records file {}", self.path))?;
        Ok(())
    }
}

impl AttendanceStore for JsonFileStore {
    fn write_back(&mut self, record: &AttendanceRecord) -> Result<()> {
        self.rows
            .insert((record.user_id, record.date), record.clone());
        Ok(())
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {path}"))
}

fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "reconcile.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    let today = config.today.unwrap_or_else(|| Local::now().date_naive());
    info!(%today, dry_run = config.dry_run, "Reconciliation run starting");

    let schedules: HashMap<u64, WeeklySchedule> = load_json(&config.schedules_file)?;
    let records: Vec<AttendanceRecord> = load_json(&config.records_file)?;
    let permissions: Vec<Permission> = load_json(&config.permissions_file)?;

    let mut store = JsonFileStore::new(config.records_file.clone(), &records, config.dry_run);

    // Records grouped per user; each user is reconciled on its own, so a
    // future worker pool can take a user per worker without contention.
    let mut by_user: HashMap<u64, Vec<AttendanceRecord>> = HashMap::new();
    for record in records {
        by_user.entry(record.user_id).or_default().push(record);
    }
    let mut user_ids: Vec<u64> = by_user.keys().copied().collect();
    user_ids.sort_unstable();

    let fallback = WeeklySchedule::default();
    let mut totals = ReconcileSummary::default();

    for user_id in user_ids {
        let schedule = match schedules.get(&user_id) {
            Some(s) => s,
            None => {
                // No schedule at all: every day reconciles as non-working.
                warn!(user_id, "No weekly schedule on file");
                &fallback
            }
        };
        let user_permissions: Vec<Permission> = permissions
            .iter()
            .filter(|p| p.employee_id == user_id)
            .cloned()
            .collect();

        let mut user_records = by_user.remove(&user_id).unwrap_or_default();
        let outcome = hourbank::reconcile(
            &mut user_records,
            schedule,
            &user_permissions,
            today,
            &mut store,
        );

        for change in &outcome.changes {
            info!(
                user_id,
                date = %change.date,
                old_actual = change.old_actual,
                new_actual = change.new_actual,
                old_balance = change.old_balance,
                new_balance = change.new_balance,
                "Corrected attendance row"
            );
        }
        totals.fixed += outcome.summary.fixed;
        totals.skipped += outcome.summary.skipped;
        totals.errored += outcome.summary.errored;
    }

    store.flush()?;

    info!(
        fixed = totals.fixed,
        skipped = totals.skipped,
        errored = totals.errored,
        "Reconciliation run complete"
    );
    println!("{}", serde_json::to_string(&totals)?);

    Ok(())
}
