//! Conversion command handlers: `lob time`, `lob step`, `lob stats`,
//! `lob days`.

use anyhow::{bail, Result};
use chrono::NaiveDate;
use lob_calendar::SLOTS_PER_DAY;

use super::load_translator;

pub fn time(step: u64, config_paths: &[String]) -> Result<()> {
    let translator = load_translator(config_paths)?;
    let accurate_time = translator.to_timestamp(step)?;
    println!("time_step={}", step);
    println!("accurate_time={}", accurate_time);
    Ok(())
}

pub fn step(time: &str, config_paths: &[String]) -> Result<()> {
    let translator = load_translator(config_paths)?;
    let time_step = translator.to_step(time)?;
    println!("time={}", time);
    println!("time_step={}", time_step);
    Ok(())
}

pub fn stats(config_paths: &[String]) -> Result<()> {
    let translator = load_translator(config_paths)?;
    let stats = translator.stats();
    let (start, end) = translator.calendar().horizon();
    println!("horizon_start={}", start);
    println!("horizon_end={}", end);
    println!("trading_days_count={}", stats.trading_days_count);
    println!(
        "max_supported_time_step={}",
        stats
            .max_supported_time_step
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    println!("cache_size={}", stats.cache_size);
    Ok(())
}

/// List trading days in `[from, to]` (defaults: the whole horizon) with the
/// first step of each day.
pub fn days(from: Option<NaiveDate>, to: Option<NaiveDate>, config_paths: &[String]) -> Result<()> {
    let translator = load_translator(config_paths)?;
    let (start, end) = translator.calendar().horizon();
    let from = from.unwrap_or(start);
    let to = to.unwrap_or(end);
    if from > to {
        bail!("--from ({from}) must not be after --to ({to})");
    }

    let calendar = translator.calendar();
    let days = calendar.days_between(from, to);
    for date in days {
        // days_between only returns calendar members
        let Some(index) = calendar.index_of(*date) else {
            continue;
        };
        println!(
            "day_index={} date={} first_step={}",
            index,
            date,
            index as u64 * SLOTS_PER_DAY
        );
    }
    println!("count={}", days.len());
    Ok(())
}
