//! `fern` dispatcher for the `log` facade.

use anyhow::Context;

/// Installs a stdout logger with millisecond timestamps.
///
/// The dispatcher itself lets every record through; `level` only sets the
/// facade's max level, so [`set_level`] can raise or lower it later (once
/// the config naming the real level has been read).
///
/// Fails if another logger is already installed.
pub fn init(level: log::LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{:<5}] {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(std::io::stdout())
        .apply()
        .context("install logger")?;
    set_level(level);
    Ok(())
}

/// Changes the verbosity of an installed logger.
pub fn set_level(level: log::LevelFilter) {
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_can_change_after_install() {
        // other tests never install a logger, so this one owns the global
        init(log::LevelFilter::Info).unwrap();
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        set_level(log::LevelFilter::Debug);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(init(log::LevelFilter::Warn).is_err());
    }
}
