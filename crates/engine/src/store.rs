use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use common::{Bias, Error, Result};

/// Last dispatched bias per timeframe, as read from or written to disk.
pub type SignalState = BTreeMap<String, Bias>;

/// File-backed store of the last dispatched bias per timeframe.
///
/// Layout is one `timeframe:bias` pair per line. The whole file is read on
/// every lookup and rewritten on every update (write to `<path>.tmp`, then
/// rename into place). A missing file is an empty store, and so is one that
/// cannot be read as text. Lines that do not parse are skipped; every valid
/// entry survives the next rewrite.
#[derive(Debug, Clone)]
pub struct SignalStore {
    path: PathBuf,
}

impl SignalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last dispatched bias for `timeframe`, `Bias::None` if never set.
    pub fn get(&self, timeframe: &str) -> Bias {
        self.load().get(timeframe).copied().unwrap_or_default()
    }

    /// Record `bias` for `timeframe`, keeping every other entry.
    pub fn set(&self, timeframe: &str, bias: Bias) -> Result<()> {
        let mut state = self.load();
        state.insert(timeframe.to_string(), bias);
        self.write(&state)?;
        debug!(timeframe, %bias, path = %self.path.display(), "Signal state updated");
        Ok(())
    }

    /// Full mapping; degrades to empty when the file cannot be read.
    pub fn load(&self) -> SignalState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable signal state");
                SignalState::new()
            }
        }
    }

    /// Strict variant of [`load`](Self::load).
    pub fn try_load(&self) -> Result<SignalState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(SignalState::new()),
            Err(e) => return Err(Error::StoreCorruption(e.to_string())),
        };
        Ok(parse_state(&content))
    }

    fn write(&self, state: &SignalState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, render_state(state))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::Io(e)
        })
    }
}

fn parse_state(content: &str) -> SignalState {
    let mut state = SignalState::new();
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Some((timeframe, bias)) => {
                state.insert(timeframe.to_string(), bias);
            }
            None => warn!(line = n + 1, content = line, "Skipping unrecognised signal state line"),
        }
    }
    state
}

fn parse_line(line: &str) -> Option<(&str, Bias)> {
    let (timeframe, bias) = line.split_once(':')?;
    let timeframe = timeframe.trim();
    if timeframe.is_empty() {
        return None;
    }
    Some((timeframe, bias.parse().ok()?))
}

fn render_state(state: &SignalState) -> String {
    state
        .iter()
        .map(|(timeframe, bias)| format!("{timeframe}:{bias}\n"))
        .collect()
}
