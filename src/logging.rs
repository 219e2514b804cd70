//! `log` facade backend that forwards records to the platform debug log.

use std::str::FromStr;

use log::{LevelFilter, Log, Metadata, Record};
use once_cell::sync::{Lazy, OnceCell};

use crate::debug_log::{DebugChannel, PlatformLog};
use crate::error::{Error, Result};
use crate::greeting::LOG_TAG;

static INSTALLED: OnceCell<bool> = OnceCell::new();
static BRIDGE_LOGGER: Lazy<BridgeLogger> = Lazy::new(|| BridgeLogger::new(resolve_filter()));

#[derive(Clone, Debug, PartialEq)]
struct TargetFilter {
    target: String,
    level: LevelFilter,
}

/// `RUST_LOG`-style filter: a bare level sets the default, `target=level`
/// overrides it for targets starting with `target`.
#[derive(Clone, Debug, PartialEq)]
struct LogFilter {
    default: LevelFilter,
    directives: Vec<TargetFilter>,
}

impl LogFilter {
    fn crate_only(level: LevelFilter) -> Self {
        Self {
            default: LevelFilter::Off,
            directives: vec![TargetFilter {
                target: LOG_TAG.to_string(),
                level,
            }],
        }
    }

    fn level_for(&self, target: &str) -> LevelFilter {
        self.directives
            .iter()
            .filter(|directive| target.starts_with(&directive.target))
            .max_by_key(|directive| directive.target.len())
            .map_or(self.default, |directive| directive.level)
    }

    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level_for(metadata.target())
    }

    fn max_level(&self) -> LevelFilter {
        self.directives
            .iter()
            .map(|directive| directive.level)
            .fold(self.default, Ord::max)
    }
}

fn parse_level(value: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(value.trim())
        .map_err(|_| Error::Logger(format!("invalid level `{}`", value.trim())))
}

impl FromStr for LogFilter {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self> {
        let mut filter = LogFilter {
            default: LevelFilter::Off,
            directives: Vec::new(),
        };
        for directive in spec.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                Some((target, level)) => {
                    let target = target.trim();
                    if target.is_empty() {
                        return Err(Error::Logger(format!("missing target in `{directive}`")));
                    }
                    filter.directives.push(TargetFilter {
                        target: target.to_string(),
                        level: parse_level(level)?,
                    });
                }
                None => filter.default = parse_level(directive)?,
            }
        }
        Ok(filter)
    }
}

fn filter_from(value: Option<&str>) -> LogFilter {
    value
        .and_then(|spec| spec.parse().ok())
        .unwrap_or_else(|| LogFilter::crate_only(LevelFilter::Info))
}

fn resolve_filter() -> LogFilter {
    filter_from(std::env::var("RUST_LOG").ok().as_deref())
}

struct BridgeLogger {
    filter: LogFilter,
}

impl BridgeLogger {
    fn new(filter: LogFilter) -> Self {
        Self { filter }
    }
}

impl Log for BridgeLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.filter.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("[{}] {}", record.target(), record.args());
        let _ = PlatformLog.write(record.level().into(), LOG_TAG, &message);
    }

    fn flush(&self) {}
}

/// Installs the bridge logger as the process `log` backend.
///
/// Safe to call repeatedly; only the first call does any work.
pub(crate) fn init() -> Result<()> {
    let installed = *INSTALLED.get_or_init(|| {
        log::set_logger(&*BRIDGE_LOGGER)
            .map(|()| log::set_max_level(BRIDGE_LOGGER.filter.max_level()))
            .is_ok()
    });
    if installed {
        Ok(())
    } else {
        Err(Error::Logger(
            "logging already initialized by another logger".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use log::{Level, MetadataBuilder};

    use super::*;

    fn metadata(target: &str, level: Level) -> Metadata<'_> {
        MetadataBuilder::new().target(target).level(level).build()
    }

    #[test]
    fn default_filter_only_covers_crate_targets() {
        let filter = filter_from(None);
        assert!(filter.enabled(&metadata("mediacodec::bridge", Level::Info)));
        assert!(!filter.enabled(&metadata("mediacodec::bridge", Level::Debug)));
        assert!(!filter.enabled(&metadata("jni", Level::Error)));
        assert_eq!(filter.max_level(), LevelFilter::Info);
    }

    #[test]
    fn target_directives_use_longest_prefix() {
        let filter: LogFilter = "warn,mediacodec=info,mediacodec::bridge=trace".parse().unwrap();
        assert!(filter.enabled(&metadata("mediacodec::bridge", Level::Trace)));
        assert!(!filter.enabled(&metadata("mediacodec::logging", Level::Debug)));
        assert!(filter.enabled(&metadata("other", Level::Warn)));
        assert!(!filter.enabled(&metadata("other", Level::Info)));
        assert_eq!(filter.max_level(), LevelFilter::Trace);
    }

    #[test]
    fn bare_level_sets_default() {
        let filter: LogFilter = " Debug , ".parse().unwrap();
        assert_eq!(filter.level_for("jni::wrapper"), LevelFilter::Debug);
        assert!(filter.directives.is_empty());
    }

    #[test]
    fn malformed_directives_are_rejected() {
        assert!("=info".parse::<LogFilter>().is_err());
        assert!("mediacodec=".parse::<LogFilter>().is_err());
        assert!("mediacodec=loud".parse::<LogFilter>().is_err());
        assert!("jni".parse::<LogFilter>().is_err());
    }

    #[test]
    fn invalid_filter_falls_back_to_default() {
        assert_eq!(
            filter_from(Some("mediacodec=loud")),
            LogFilter::crate_only(LevelFilter::Info)
        );
    }

    #[test]
    fn init_installs_once_and_sets_max_level() {
        init().unwrap();
        init().unwrap();
        assert_eq!(log::max_level(), BRIDGE_LOGGER.filter.max_level());
    }
}
