use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::formatting::truncate_visible;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) STORE KEYS
    //
    let mut stmt = pool
        .conn
        .prepare("SELECT key, value, updated_at FROM kv ORDER BY key ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut entries = Vec::new();
    for r in rows {
        entries.push(r?);
    }

    println!(
        "{}• Stored keys:{} {}{}{}",
        CYAN,
        RESET,
        GREEN,
        entries.len(),
        RESET
    );
    for (key, value, updated_at) in &entries {
        println!(
            "    {:<18} {} {}({}){}",
            key,
            truncate_visible(value, 60),
            GREY,
            updated_at,
            RESET
        );
    }

    //
    // 3) LOG
    //
    let log_count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    let last_op: Option<String> = pool
        .conn
        .query_row(
            "SELECT operation FROM log ORDER BY id DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?;

    println!(
        "{}• Log entries:{} {} (last: {})",
        CYAN,
        RESET,
        log_count,
        last_op.unwrap_or_else(|| format!("{GREY}--{RESET}"))
    );

    println!();
    Ok(())
}
