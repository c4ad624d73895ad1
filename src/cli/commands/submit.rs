use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submission::FileSelection;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::submission::{SubmissionRecord, save_submission};
use crate::models::tier::Status;
use crate::store::sqlite::SqliteStore;
use crate::ui::overlay::render_box;
use chrono::Utc;
use std::time::Duration;

/// Select `file`, submit it and keep the confirmation up for its window.
pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Submit { file } = cmd {
        let mut selection = FileSelection::new();

        // rejected names stop here: nothing is logged or stored
        selection.select(file)?;

        let now = Utc::now();
        let name = selection.submit(now)?;

        // running displays pick this up and switch to "Submitted"
        let mut store = SqliteStore::open(&cfg.database)?;
        save_submission(&mut store, &SubmissionRecord::new(&name, now))?;
        ttlog_quiet(store.conn(), "submit", &name, "Assignment submitted");

        println!(
            "{}",
            render_box(
                "✅ Submitted!",
                &format!("{} has been submitted successfully.", name),
                60
            )
        );
        println!("Status: {}", Status::Submitted.text());

        if !is_test {
            while selection.overlay_visible(Utc::now()) {
                std::thread::sleep(Duration::from_millis(100));
            }
        }
        selection.dismiss_overlay();
    }

    Ok(())
}
