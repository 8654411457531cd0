//! Cached quote board with explicit fallback
//!
//! Policy per request:
//! 1. a primary result younger than the TTL is served as `Cached`;
//! 2. otherwise the primary is fetched and, on success, cached and served as `Live`;
//! 3. if the primary fails, the fallback list is served as `Fallback` and not cached;
//! 4. if the fallback fails too, its error is returned.
//!
//! A board without a primary feed always serves the fallback as `Fallback`.
//! The cache lock is never held while a source is being fetched.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, MutexGuard};

use super::model::{Freshness, Quote, QuoteSnapshot};
use super::source::{QuoteSource, StaticQuotes};
use super::FetchError;

/// Default time a primary result is reused (60 seconds)
pub const DEFAULT_QUOTE_TTL_SECS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedQuotes {
    fetched_at: DateTime<Utc>,
    quotes: Vec<Quote>,
}

pub struct QuoteBoard {
    primary: Option<Box<dyn QuoteSource>>,
    fallback: Box<dyn QuoteSource>,
    ttl: Duration,
    cache: Mutex<Option<CachedQuotes>>,
}

impl QuoteBoard {
    pub fn new(primary: Box<dyn QuoteSource>, fallback: Box<dyn QuoteSource>, ttl: Duration) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            ttl,
            cache: Mutex::new(None),
        }
    }

    /// Board over `primary` with the built-in static list as fallback
    pub fn with_static_fallback(primary: Box<dyn QuoteSource>, ttl: Duration) -> Self {
        Self::new(primary, Box::new(StaticQuotes::default()), ttl)
    }

    /// Board with no live feed: every snapshot is the fallback list
    pub fn fallback_only(fallback: Box<dyn QuoteSource>, ttl: Duration) -> Self {
        Self {
            primary: None,
            fallback,
            ttl,
            cache: Mutex::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot at the current wall-clock time
    pub fn current(&self) -> Result<QuoteSnapshot, FetchError> {
        self.snapshot(Utc::now())
    }

    /// Snapshot as of `now`
    pub fn snapshot(&self, now: DateTime<Utc>) -> Result<QuoteSnapshot, FetchError> {
        let primary = match &self.primary {
            Some(primary) => primary,
            None => {
                log::debug!("no quote feed configured, serving {}", self.fallback.name());
                return self.serve_fallback(now);
            }
        };

        let cached = self.lock_cache().clone();
        if let Some(cached) = cached {
            let age = now.signed_duration_since(cached.fetched_at);
            if age >= Duration::zero() && age < self.ttl {
                log::debug!("serving cached quotes from {} ({}s old)", primary.name(), age.num_seconds());
                return Ok(QuoteSnapshot {
                    quotes: cached.quotes,
                    as_of: cached.fetched_at,
                    freshness: Freshness::Cached,
                    source: primary.name().to_string(),
                });
            }
        }

        match primary.fetch() {
            Ok(quotes) => {
                log::debug!("fetched {} quotes from {}", quotes.len(), primary.name());
                *self.lock_cache() = Some(CachedQuotes {
                    fetched_at: now,
                    quotes: quotes.clone(),
                });
                Ok(QuoteSnapshot {
                    quotes,
                    as_of: now,
                    freshness: Freshness::Live,
                    source: primary.name().to_string(),
                })
            }
            Err(primary_err) => {
                log::warn!(
                    "quote source {} failed, using {}: {}",
                    primary.name(),
                    self.fallback.name(),
                    primary_err
                );
                self.serve_fallback(now)
            }
        }
    }

    /// Drop any cached primary result
    pub fn invalidate(&self) {
        *self.lock_cache() = None;
    }

    fn serve_fallback(&self, now: DateTime<Utc>) -> Result<QuoteSnapshot, FetchError> {
        let quotes = self.fallback.fetch()?;
        Ok(QuoteSnapshot {
            quotes,
            as_of: now,
            freshness: Freshness::Fallback,
            source: self.fallback.name().to_string(),
        })
    }

    fn lock_cache(&self) -> MutexGuard<'_, Option<CachedQuotes>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{mpsc, Arc};
    use std::thread;

    #[derive(Default)]
    struct FeedState {
        calls: AtomicUsize,
        failing: AtomicBool,
    }

    struct ScriptedFeed {
        state: Arc<FeedState>,
    }

    impl QuoteSource for ScriptedFeed {
        fn name(&self) -> &str {
            "scripted"
        }

        fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
            self.state.calls.fetch_add(1, Ordering::SeqCst);
            if self.state.failing.load(Ordering::SeqCst) {
                return Err(FetchError::Unavailable {
                    source_name: "scripted".into(),
                    message: "connection refused".into(),
                });
            }
            Ok(vec![Quote::new("TCS", "Tata Consultancy Services", 4_000.0, 40.0)])
        }
    }

    fn board() -> (QuoteBoard, Arc<FeedState>) {
        let state = Arc::new(FeedState::default());
        let feed = ScriptedFeed { state: Arc::clone(&state) };
        let board = QuoteBoard::with_static_fallback(Box::new(feed), Duration::seconds(60));
        (board, state)
    }

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-05T09:15:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_live_then_cached() {
        let (board, state) = board();

        let first = board.snapshot(t0()).unwrap();
        assert_eq!(first.freshness, Freshness::Live);
        assert_eq!(first.source, "scripted");

        let second = board.snapshot(t0() + Duration::seconds(30)).unwrap();
        assert_eq!(second.freshness, Freshness::Cached);
        assert_eq!(second.as_of, t0());
        assert_eq!(second.quotes, first.quotes);
        assert_eq!(state.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_refetch_after_ttl() {
        let (board, state) = board();

        board.snapshot(t0()).unwrap();
        let later = board.snapshot(t0() + Duration::seconds(60)).unwrap();

        assert_eq!(later.freshness, Freshness::Live);
        assert_eq!(later.as_of, t0() + Duration::seconds(60));
        assert_eq!(state.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fallback_on_primary_error() {
        let (board, state) = board();
        state.failing.store(true, Ordering::SeqCst);

        let snapshot = board.snapshot(t0()).unwrap();
        assert_eq!(snapshot.freshness, Freshness::Fallback);
        assert_eq!(snapshot.source, "static");
        assert_eq!(snapshot.quotes.len(), 8);

        // Fallback is not cached: the next request retries the primary
        state.failing.store(false, Ordering::SeqCst);
        let next = board.snapshot(t0() + Duration::seconds(1)).unwrap();
        assert_eq!(next.freshness, Freshness::Live);
        assert_eq!(state.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_both_sources_fail() {
        let state = Arc::new(FeedState::default());
        state.failing.store(true, Ordering::SeqCst);
        let board = QuoteBoard::new(
            Box::new(ScriptedFeed { state }),
            Box::new(StaticQuotes::new(Vec::new())),
            Duration::seconds(60),
        );

        assert!(matches!(board.snapshot(t0()), Err(FetchError::Empty { .. })));
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let (board, state) = board();

        board.snapshot(t0()).unwrap();
        board.invalidate();
        let again = board.snapshot(t0() + Duration::seconds(5)).unwrap();

        assert_eq!(again.freshness, Freshness::Live);
        assert_eq!(state.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clock_going_backwards_refetches() {
        let (board, state) = board();

        board.snapshot(t0()).unwrap();
        let earlier = board.snapshot(t0() - Duration::seconds(5)).unwrap();

        assert_eq!(earlier.freshness, Freshness::Live);
        assert_eq!(state.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fallback_only_board_never_reports_live() {
        let board = QuoteBoard::fallback_only(Box::new(StaticQuotes::default()), Duration::seconds(60));

        let first = board.snapshot(t0()).unwrap();
        let second = board.snapshot(t0() + Duration::seconds(10)).unwrap();

        for snapshot in [&first, &second] {
            assert_eq!(snapshot.freshness, Freshness::Fallback);
            assert_eq!(snapshot.source, "static");
            assert_eq!(snapshot.quotes.len(), 8);
        }
        assert_eq!(second.as_of, t0() + Duration::seconds(10));
    }

    /// Blocks inside every fetch after the first until released
    struct GatedFeed {
        calls: AtomicUsize,
        entered: mpsc::SyncSender<()>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl QuoteSource for GatedFeed {
        fn name(&self) -> &str {
            "gated"
        }

        fn fetch(&self) -> Result<Vec<Quote>, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) > 0 {
                self.entered.send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }
            Ok(vec![Quote::new("INFY", "Infosys", 1_500.0, -12.0)])
        }
    }

    #[test]
    fn test_cached_reads_do_not_wait_for_slow_fetch() {
        let (entered_tx, entered_rx) = mpsc::sync_channel(1);
        let (release_tx, release_rx) = mpsc::channel();
        let feed = GatedFeed {
            calls: AtomicUsize::new(0),
            entered: entered_tx,
            release: Mutex::new(release_rx),
        };
        let board = Arc::new(QuoteBoard::with_static_fallback(Box::new(feed), Duration::seconds(60)));
        board.snapshot(t0()).unwrap();

        // An expired request refetches and parks inside the feed
        let slow = {
            let board = Arc::clone(&board);
            thread::spawn(move || board.snapshot(t0() + Duration::seconds(120)).unwrap())
        };
        entered_rx.recv().unwrap();

        let (done_tx, done_rx) = mpsc::channel();
        let reader = {
            let board = Arc::clone(&board);
            thread::spawn(move || {
                let _ = done_tx.send(board.snapshot(t0() + Duration::seconds(30)).unwrap().freshness);
            })
        };
        let freshness = done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("cached read blocked behind an in-flight fetch");
        assert_eq!(freshness, Freshness::Cached);

        release_tx.send(()).unwrap();
        assert_eq!(slow.join().unwrap().freshness, Freshness::Live);
        reader.join().unwrap();
    }
}
