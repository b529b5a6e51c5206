//! Debounced, cancellable content search over a markdown folder.
//!
//! A [`SearchCoordinator`] is owned by one thread (the UI loop). Each call
//! to [`SearchCoordinator::search`] cancels whatever is in flight and starts
//! a background job that:
//!
//! 1. waits out the debounce interval,
//! 2. walks the folder for markdown files,
//! 3. scans file contents in parallel with Rayon, stopping at the result cap,
//! 4. sends the finished result set back over a channel.
//!
//! The coordinator applies finished results in [`SearchCoordinator::poll`]
//! or [`SearchCoordinator::wait`], and only when they carry the current
//! generation. Every new search or cancel bumps the generation, so the most
//! recently issued query always wins regardless of which job finishes first.
//! Results are replaced wholesale; partial results are never visible.

use crate::document::classify;
use crate::scanner::walk_markdown_files_while;
use crate::types::ContentMatch;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};

/// Delay between the last query change and the start of a scan
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Maximum number of matches kept per search
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Maximum characters of a matching line kept in a result
pub const DEFAULT_MAX_LINE_CHARS: usize = 200;

/// Tunables for content search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    /// Debounce interval before a scan starts
    pub debounce: Duration,

    /// Result cap across all files
    pub max_results: usize,

    /// Truncation length for matched lines
    pub max_line_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce: DEFAULT_DEBOUNCE,
            max_results: DEFAULT_MAX_RESULTS,
            max_line_chars: DEFAULT_MAX_LINE_CHARS,
        }
    }
}

/// Where the most recently issued search is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// No search issued, or the query/root was cleared
    Idle,
    /// Waiting for the debounce interval to pass
    Debouncing,
    /// Walking the folder and scanning files
    Scanning,
    /// Results for the current query are published
    Completed,
    /// The search was cancelled before it published
    Cancelled,
}

/// Cooperative cancellation for one search job.
///
/// A token is cancelled once the shared generation counter moves past the
/// generation it was issued under. Dropping the coordinator's paired sender
/// wakes a token blocked in [`CancelToken::sleep`] immediately.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    current: Arc<AtomicU64>,
    wake: Receiver<()>,
}

impl CancelToken {
    /// A token that is never cancelled, for scanning outside a coordinator.
    pub fn detached() -> Self {
        CancelToken {
            generation: 0,
            current: Arc::new(AtomicU64::new(0)),
            wake: crossbeam_channel::never(),
        }
    }

    /// The generation this token was issued under
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a newer search (or a cancel) has superseded this one
    pub fn is_cancelled(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.generation
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed and the token is still
    /// live, `false` if it was cancelled before or during the wait.
    pub fn sleep(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        match self.wake.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => !self.is_cancelled(),
            Ok(()) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }
}

/// Messages from a search job to its coordinator
#[derive(Debug)]
enum SearchEvent {
    /// The debounce passed and the folder walk started
    Scanning { generation: u64 },
    /// The job ran to completion
    Finished {
        generation: u64,
        files: usize,
        matches: Vec<ContentMatch>,
    },
}

/// Owner of content search state.
///
/// `results`, `is_searching` and the phase are only changed by methods
/// called on the owning thread; background jobs communicate through a
/// channel drained by [`poll`](Self::poll) or [`wait`](Self::wait).
pub struct SearchCoordinator {
    settings: SearchSettings,
    query: String,
    root: Option<PathBuf>,
    results: Vec<ContentMatch>,
    is_searching: bool,
    phase: SearchPhase,

    // In-flight work
    generation: Arc<AtomicU64>,
    cancel_tx: Option<Sender<()>>,
    event_tx: Sender<SearchEvent>,
    event_rx: Receiver<SearchEvent>,

    issued_at: Option<Instant>,
    last_duration: Option<Duration>,
    last_file_count: usize,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchCoordinator {
    /// Create a coordinator with the default debounce and caps.
    pub fn new() -> Self {
        Self::with_settings(SearchSettings::default())
    }

    /// Create a coordinator with custom settings.
    pub fn with_settings(settings: SearchSettings) -> Self {
        let (event_tx, event_rx) = unbounded();
        SearchCoordinator {
            settings,
            query: String::new(),
            root: None,
            results: Vec::new(),
            is_searching: false,
            phase: SearchPhase::Idle,
            generation: Arc::new(AtomicU64::new(0)),
            cancel_tx: None,
            event_tx,
            event_rx,
            issued_at: None,
            last_duration: None,
            last_file_count: 0,
        }
    }

    /// Current settings
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// The most recently issued query
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The root of the most recently issued search
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Published results of the last completed search
    pub fn results(&self) -> &[ContentMatch] {
        &self.results
    }

    /// Whether a search is pending or running
    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    /// Lifecycle phase of the most recently issued search
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Generation of the most recently issued search or cancel
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Time from issuing to publishing the last completed search
    pub fn last_duration(&self) -> Option<Duration> {
        self.last_duration
    }

    /// Number of markdown files scanned by the last completed search
    pub fn last_file_count(&self) -> usize {
        self.last_file_count
    }

    /// Start a new search, superseding any search in flight.
    ///
    /// An empty query or missing root clears the results immediately and
    /// leaves the coordinator idle. Otherwise the scan starts after the
    /// debounce interval; repeating the current query restarts it.
    pub fn search(&mut self, query: &str, root: Option<&Path>) {
        self.cancel_in_flight();
        self.query = query.to_string();
        self.root = root.map(Path::to_path_buf);

        let root = match root {
            Some(root) if !query.is_empty() => root.to_path_buf(),
            _ => {
                self.results.clear();
                self.is_searching = false;
                self.phase = SearchPhase::Idle;
                return;
            }
        };

        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded(0);
        let token = CancelToken {
            generation: self.generation(),
            current: Arc::clone(&self.generation),
            wake: cancel_rx,
        };
        let job = SearchJob {
            token,
            root,
            lower_query: query.to_lowercase(),
            settings: self.settings.clone(),
            events: self.event_tx.clone(),
        };

        let issued_at = Instant::now();
        let spawned = thread::Builder::new()
            .name("gloss-search".to_string())
            .spawn(move || job.run());

        match spawned {
            Ok(_) => {
                self.cancel_tx = Some(cancel_tx);
                self.is_searching = true;
                self.phase = SearchPhase::Debouncing;
                self.issued_at = Some(issued_at);
            }
            Err(e) => {
                error!(error = %e, "Failed to start search worker");
                self.results.clear();
                self.is_searching = false;
                self.phase = SearchPhase::Idle;
            }
        }
    }

    /// Cancel the search in flight, if any. Results are left untouched.
    pub fn cancel(&mut self) {
        if self.cancel_in_flight() {
            debug!(query = %self.query, "Search cancelled");
            self.phase = SearchPhase::Cancelled;
        }
        self.is_searching = false;
    }

    /// Apply any messages from background jobs without blocking.
    ///
    /// Returns true if the visible state (results or phase) changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// Block until the current search publishes or `timeout` elapses.
    ///
    /// Returns true if no search is in flight on return.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_searching {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.event_rx.recv_timeout(remaining) {
                Ok(event) => {
                    self.apply(event);
                }
                Err(_) => return false,
            }
        }
        true
    }

    /// Invalidate the current generation and wake its job.
    ///
    /// Returns true if a job was in flight.
    fn cancel_in_flight(&mut self) -> bool {
        self.generation.fetch_add(1, Ordering::AcqRel);
        self.cancel_tx.take().is_some()
    }

    fn apply(&mut self, event: SearchEvent) -> bool {
        let current = self.generation();
        match event {
            SearchEvent::Scanning { generation }
                if generation == current && self.phase == SearchPhase::Debouncing =>
            {
                self.phase = SearchPhase::Scanning;
                true
            }
            SearchEvent::Finished {
                generation,
                files,
                matches,
            } if generation == current => {
                self.last_duration = self.issued_at.take().map(|t| t.elapsed());
                self.last_file_count = files;
                info!(
                    query = %self.query,
                    files,
                    matches = matches.len(),
                    "Content search complete"
                );
                self.results = matches;
                self.is_searching = false;
                self.phase = SearchPhase::Completed;
                self.cancel_tx = None;
                true
            }
            _ => {
                debug!("Discarding event from superseded search");
                false
            }
        }
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

/// One background search, bound to a cancellation token
struct SearchJob {
    token: CancelToken,
    root: PathBuf,
    lower_query: String,
    settings: SearchSettings,
    events: Sender<SearchEvent>,
}

impl SearchJob {
    fn run(self) {
        let generation = self.token.generation();

        if !self.token.sleep(self.settings.debounce) {
            debug!(generation, "Search cancelled during debounce");
            return;
        }
        let _ = self.events.send(SearchEvent::Scanning { generation });

        let files: Vec<PathBuf> =
            walk_markdown_files_while(&self.root, || !self.token.is_cancelled()).collect();
        if self.token.is_cancelled() {
            debug!(generation, "Search cancelled during folder walk");
            return;
        }

        let matches = scan_files(&files, &self.lower_query, &self.settings, &self.token);
        if self.token.is_cancelled() {
            debug!(generation, "Search cancelled during content scan");
            return;
        }

        let _ = self.events.send(SearchEvent::Finished {
            generation,
            files: files.len(),
            matches,
        });
    }
}

/// Returned from the parallel scan to stop early
struct StopScan;

/// Scan `files` in parallel and collect at most `settings.max_results` matches.
///
/// Work stops as soon as the cap is reached or the token is cancelled;
/// matches from files still in flight at that point are dropped. Ordering
/// across files is not deterministic, but each file's matches stay in line
/// order.
#[instrument(skip_all, fields(files = files.len()))]
pub fn scan_files(
    files: &[PathBuf],
    lower_query: &str,
    settings: &SearchSettings,
    token: &CancelToken,
) -> Vec<ContentMatch> {
    let max_results = settings.max_results;
    let accumulator = Mutex::new(Vec::with_capacity(max_results.min(files.len() * 4)));

    let _ = files.par_iter().try_for_each(|path| {
        if token.is_cancelled() || accumulator.lock().len() >= max_results {
            return Err(StopScan);
        }

        let matches = scan_file(path, lower_query, settings.max_line_chars);
        if token.is_cancelled() {
            return Err(StopScan);
        }
        if matches.is_empty() {
            return Ok(());
        }

        let mut collected = accumulator.lock();
        let room = max_results.saturating_sub(collected.len());
        collected.extend(matches.into_iter().take(room));
        if collected.len() >= max_results {
            Err(StopScan)
        } else {
            Ok(())
        }
    });

    accumulator.into_inner()
}

/// Find every line of `path` containing `lower_query`, case-insensitively.
///
/// `lower_query` must already be lowercase. An unreadable or non-UTF-8
/// file yields no matches.
pub fn scan_file(path: &Path, lower_query: &str, max_line_chars: usize) -> Vec<ContentMatch> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping unreadable file");
            return Vec::new();
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent_folder = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let category = classify(&file_name, &parent_folder);

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(lower_query))
        .map(|(index, line)| ContentMatch {
            path: path.to_path_buf(),
            file_name: file_name.clone(),
            line_number: index + 1,
            line_content: truncate_line(line, max_line_chars),
            category,
        })
        .collect()
}

/// First `max_chars` characters of `line`, trimmed of surrounding whitespace.
fn truncate_line(line: &str, max_chars: usize) -> String {
    let end = line
        .char_indices()
        .nth(max_chars)
        .map_or(line.len(), |(idx, _)| idx);
    line[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentCategory;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(10);

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    /// root/
    ///   README.md       "homepage", "important" on line 2
    ///   PLAN.md
    ///   notes.md
    ///   docs/api.md     "important", "endpoint" on line 2
    ///   node_modules/secret.md  "important", "secrets"
    fn make_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(
            root.join("README.md"),
            "# Welcome\nThis is the homepage with important info.",
        )
        .unwrap();
        fs::write(
            root.join("PLAN.md"),
            "# Plan\nWe need to ship the feature by Friday.",
        )
        .unwrap();
        fs::write(root.join("notes.md"), "# Notes\nSome unrelated content here.").unwrap();
        fs::create_dir(root.join("docs")).unwrap();
        fs::write(
            root.join("docs/api.md"),
            "# API Reference\nThe important endpoint returns JSON.",
        )
        .unwrap();
        fs::create_dir(root.join("node_modules")).unwrap();
        fs::write(
            root.join("node_modules/secret.md"),
            "# Hidden\nThis has important secrets.",
        )
        .unwrap();
        temp_dir
    }

    fn fast_settings() -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(10),
            ..SearchSettings::default()
        }
    }

    fn run_search(coordinator: &mut SearchCoordinator, query: &str, root: &Path) {
        coordinator.search(query, Some(root));
        assert!(coordinator.wait(WAIT), "search did not complete");
    }

    #[test]
    fn test_finds_content_in_root() {
        init_tracing();
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::new();

        run_search(&mut coordinator, "homepage", temp_dir.path());

        let results = coordinator.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_name, "README.md");
        assert_eq!(results[0].line_number, 2);
        assert_eq!(results[0].category, DocumentCategory::Readme);
        assert_eq!(
            results[0].line_content,
            "This is the homepage with important info."
        );
        assert_eq!(coordinator.phase(), SearchPhase::Completed);
        assert!(!coordinator.is_searching());
    }

    #[test]
    fn test_finds_content_in_subdirectory() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "endpoint", temp_dir.path());

        let results = coordinator.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].file_name, "api.md");
        assert_eq!(results[0].path, temp_dir.path().join("docs/api.md"));
    }

    #[test]
    fn test_case_insensitive_skips_excluded() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::new();

        run_search(&mut coordinator, "IMPORTANT", temp_dir.path());

        let found: HashSet<(String, usize)> = coordinator
            .results()
            .iter()
            .map(|r| (r.file_name.clone(), r.line_number))
            .collect();
        let expected: HashSet<(String, usize)> =
            [("README.md".to_string(), 2), ("api.md".to_string(), 2)]
                .into_iter()
                .collect();
        assert_eq!(found, expected);
        assert_eq!(coordinator.last_file_count(), 4);
        assert!(coordinator.last_duration().unwrap() >= DEFAULT_DEBOUNCE);
    }

    #[test]
    fn test_excluded_directory_never_matches() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "secrets", temp_dir.path());
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn test_no_matches() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "xyznonexistent", temp_dir.path());
        assert!(coordinator.results().is_empty());
        assert_eq!(coordinator.phase(), SearchPhase::Completed);
    }

    #[test]
    fn test_empty_query_clears_synchronously() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "homepage", temp_dir.path());
        assert!(!coordinator.results().is_empty());

        coordinator.search("important", Some(temp_dir.path()));
        assert!(coordinator.is_searching());

        coordinator.search("", Some(temp_dir.path()));
        assert!(coordinator.results().is_empty());
        assert!(!coordinator.is_searching());
        assert_eq!(coordinator.phase(), SearchPhase::Idle);

        // The superseded search must not publish later
        thread::sleep(Duration::from_millis(200));
        coordinator.poll();
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn test_missing_root_is_idle() {
        let mut coordinator = SearchCoordinator::new();
        coordinator.search("anything", None);

        assert!(!coordinator.is_searching());
        assert_eq!(coordinator.phase(), SearchPhase::Idle);
        assert!(coordinator.results().is_empty());
        assert!(coordinator.wait(Duration::ZERO));
    }

    #[test]
    fn test_newer_query_wins() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::new();

        coordinator.search("important", Some(temp_dir.path()));
        coordinator.search("xyznonexistent", Some(temp_dir.path()));
        assert!(coordinator.wait(WAIT));

        assert!(coordinator.results().is_empty());
        assert_eq!(coordinator.query(), "xyznonexistent");
    }

    #[test]
    fn test_late_completion_is_discarded() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(SearchSettings {
            debounce: Duration::ZERO,
            ..SearchSettings::default()
        });

        // Let the first search finish its work without applying it
        coordinator.search("important", Some(temp_dir.path()));
        thread::sleep(Duration::from_millis(300));

        coordinator.search("xyznonexistent", Some(temp_dir.path()));
        assert!(coordinator.wait(WAIT));
        assert!(coordinator.results().is_empty());
    }

    #[test]
    fn test_cancel_keeps_results() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "homepage", temp_dir.path());
        assert_eq!(coordinator.results().len(), 1);

        coordinator.search("important", Some(temp_dir.path()));
        coordinator.cancel();
        assert!(!coordinator.is_searching());
        assert_eq!(coordinator.phase(), SearchPhase::Cancelled);

        thread::sleep(Duration::from_millis(200));
        coordinator.poll();
        assert_eq!(coordinator.results().len(), 1);
        assert_eq!(coordinator.results()[0].file_name, "README.md");
    }

    #[test]
    fn test_cancel_after_completion_keeps_phase() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "homepage", temp_dir.path());
        coordinator.cancel();
        assert_eq!(coordinator.phase(), SearchPhase::Completed);
    }

    #[test]
    fn test_repeat_query_restarts() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "homepage", temp_dir.path());
        let first_generation = coordinator.generation();

        coordinator.search("homepage", Some(temp_dir.path()));
        assert!(coordinator.is_searching());
        assert_eq!(coordinator.phase(), SearchPhase::Debouncing);
        assert!(coordinator.generation() > first_generation);

        assert!(coordinator.wait(WAIT));
        assert_eq!(coordinator.results().len(), 1);
    }

    #[test]
    fn test_result_cap() {
        let temp_dir = TempDir::new().unwrap();
        let body = "match here\n".repeat(10);
        for i in 0..30 {
            fs::write(temp_dir.path().join(format!("file{}.md", i)), &body).unwrap();
        }

        let mut coordinator = SearchCoordinator::with_settings(fast_settings());
        run_search(&mut coordinator, "match", temp_dir.path());
        assert_eq!(coordinator.results().len(), DEFAULT_MAX_RESULTS);

        let mut coordinator = SearchCoordinator::with_settings(SearchSettings {
            max_results: 5,
            ..fast_settings()
        });
        run_search(&mut coordinator, "match", temp_dir.path());
        assert_eq!(coordinator.results().len(), 5);
    }

    #[test]
    fn test_results_contain_query() {
        let temp_dir = make_tree();
        let mut coordinator = SearchCoordinator::with_settings(fast_settings());

        run_search(&mut coordinator, "ImPoRtAnT", temp_dir.path());
        assert!(!coordinator.results().is_empty());
        for result in coordinator.results() {
            assert!(result.line_content.to_lowercase().contains("important"));
            assert!(result.line_content.chars().count() <= DEFAULT_MAX_LINE_CHARS);
        }
    }

    #[test]
    fn test_scan_file_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("decision-log.md");
        fs::write(&path, "TODO first\r\nnothing\n   todo second   \nTodo third").unwrap();

        let matches = scan_file(&path, "todo", DEFAULT_MAX_LINE_CHARS);
        let lines: Vec<(usize, &str)> = matches
            .iter()
            .map(|m| (m.line_number, m.line_content.as_str()))
            .collect();
        assert_eq!(
            lines,
            vec![(1, "TODO first"), (3, "todo second"), (4, "Todo third")]
        );
        assert!(matches
            .iter()
            .all(|m| m.category == DocumentCategory::Decision));
    }

    #[test]
    fn test_scan_file_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("long.md");
        let line = format!("needle {}", "é".repeat(500));
        fs::write(&path, &line).unwrap();

        let matches = scan_file(&path, "needle", DEFAULT_MAX_LINE_CHARS);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_content.chars().count(), DEFAULT_MAX_LINE_CHARS);
        assert!(matches[0].line_content.starts_with("needle "));
    }

    #[test]
    fn test_scan_file_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        assert!(scan_file(&temp_dir.path().join("missing.md"), "x", 200).is_empty());

        let binary = temp_dir.path().join("binary.md");
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x78]).unwrap();
        assert!(scan_file(&binary, "x", 200).is_empty());
    }

    #[test]
    fn test_scan_files_category_from_folder() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("templates")).unwrap();
        let path = temp_dir.path().join("templates/pitch-notes.md");
        fs::write(&path, "fill me in").unwrap();

        let matches = scan_files(
            &[path],
            "fill",
            &SearchSettings::default(),
            &CancelToken::detached(),
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, DocumentCategory::Template);
    }

    #[test]
    fn test_cancelled_token() {
        let generation = Arc::new(AtomicU64::new(1));
        let (tx, rx) = crossbeam_channel::bounded(0);
        let token = CancelToken {
            generation: 1,
            current: Arc::clone(&generation),
            wake: rx,
        };
        assert!(!token.is_cancelled());

        generation.fetch_add(1, Ordering::AcqRel);
        drop(tx);

        let start = Instant::now();
        assert!(!token.sleep(Duration::from_secs(30)));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_cancel_stops_walk_between_non_markdown_entries() {
        let temp_dir = TempDir::new().unwrap();
        let assets = temp_dir.path().join("assets");
        fs::create_dir(&assets).unwrap();
        for i in 0..30 {
            fs::write(assets.join(format!("img{}.png", i)), "").unwrap();
        }
        fs::write(temp_dir.path().join("notes.md"), "notes").unwrap();

        let generation = Arc::new(AtomicU64::new(1));
        let token = CancelToken {
            generation: 1,
            current: Arc::clone(&generation),
            wake: crossbeam_channel::never(),
        };

        let mut visited = 0;
        let files: Vec<PathBuf> = walk_markdown_files_while(temp_dir.path(), || {
            visited += 1;
            if visited == 5 {
                generation.fetch_add(1, Ordering::AcqRel);
            }
            !token.is_cancelled()
        })
        .collect();

        assert_eq!(visited, 5);
        assert!(files.len() <= 1);
    }

    #[test]
    fn test_detached_token_sleeps() {
        let token = CancelToken::detached();
        assert!(token.sleep(Duration::from_millis(5)));
        assert!(!token.is_cancelled());
    }
}
