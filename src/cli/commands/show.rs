use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::countdown::InitOutcome;
use crate::core::page::{DisplayPage, PageSettings};
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::models::duration::DURATION_KEY;
use crate::store::sqlite::SqliteStore;
use crate::ui::messages::{info, warning};
use crate::ui::view::{RenderMode, TerminalView};
use std::time::{Duration, Instant};

/// Run the display page until interrupted (or for `--exit-after` seconds).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show {
        once,
        poll_ms,
        exit_after,
        lines,
    } = cmd
    {
        let store = SqliteStore::open(&cfg.database)?;

        let mut settings = PageSettings::from_config(cfg);
        if let Some(ms) = poll_ms {
            settings.poll_interval = Duration::from_millis((*ms).max(1));
        }

        let mode = if *once {
            RenderMode::Deferred
        } else if *lines {
            RenderMode::Lines
        } else {
            RenderMode::Redraw
        };
        let mut view = TerminalView::stdout(mode);
        let mut page = DisplayPage::new(store, SystemClock, settings);

        let outcome = page.start(Instant::now(), &mut view)?;
        log_outcome(page.engine().store(), &outcome);

        if *once {
            page.tick_now(&mut view);
            view.finish();
            return Ok(());
        }

        info("Counting down… press Ctrl+C to exit.");

        let deadline = exit_after.map(|s| Instant::now() + Duration::from_secs(s));
        page.run(
            &mut view,
            || deadline.is_none_or(|d| Instant::now() < d),
            log_outcome,
        );
        view.finish();
    }

    Ok(())
}

fn log_outcome(store: &SqliteStore, outcome: &InitOutcome) {
    match outcome {
        InitOutcome::Stored => {}
        InitOutcome::Defaulted => ttlog_quiet(
            store.conn(),
            "default",
            DURATION_KEY,
            "No countdown stored; default duration written",
        ),
        InitOutcome::Recovered(reason) => {
            warning(format!(
                "Stored countdown was unreadable ({}); default duration written",
                reason
            ));
            ttlog_quiet(store.conn(), "recovered", DURATION_KEY, reason);
        }
    }
}
