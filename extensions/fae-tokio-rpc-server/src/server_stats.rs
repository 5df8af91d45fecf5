use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Running counters shared by every connection task.
#[derive(Debug)]
pub struct ServerStats {
    started_at: Instant,
    total_sessions: AtomicU64,
    active_sessions: AtomicU64,
    total_calls: AtomicU64,
    total_failed_calls: AtomicU64,
    requests_by_peer: Mutex<HashMap<IpAddr, u64>>,
}

/// A point-in-time copy of [`ServerStats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub uptime: Duration,
    pub total_sessions: u64,
    pub active_sessions: u64,
    pub total_calls: u64,
    pub total_failed_calls: u64,
    pub requests_by_peer: BTreeMap<IpAddr, u64>,
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "uptime={:.3}s sessions={} active={} calls={} failed={} peers=[",
            self.uptime.as_secs_f64(),
            self.total_sessions,
            self.active_sessions,
            self.total_calls,
            self.total_failed_calls
        )?;
        for (i, (ip, n)) in self.requests_by_peer.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ip}:{n}")?;
        }
        f.write_str("]")
    }
}

impl Default for ServerStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            total_sessions: AtomicU64::new(0),
            active_sessions: AtomicU64::new(0),
            total_calls: AtomicU64::new(0),
            total_failed_calls: AtomicU64::new(0),
            requests_by_peer: Mutex::new(HashMap::new()),
        }
    }

    pub fn session_opened(&self) {
        self.total_sessions.fetch_add(1, Ordering::Relaxed);
        self.active_sessions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_closed(&self) {
        // Saturate so an unmatched close cannot wrap the gauge.
        let _ = self
            .active_sessions
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Counts one handled call from `peer`. `failed` marks calls answered
    /// with an exception.
    pub fn record_call(&self, peer: IpAddr, failed: bool) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        if failed {
            self.total_failed_calls.fetch_add(1, Ordering::Relaxed);
        }

        let mut by_peer = self
            .requests_by_peer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *by_peer.entry(peer).or_insert(0) += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        let requests_by_peer = self
            .requests_by_peer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(ip, n)| (*ip, *n))
            .collect();

        StatsSnapshot {
            uptime: self.started_at.elapsed(),
            total_sessions: self.total_sessions.load(Ordering::Relaxed),
            active_sessions: self.active_sessions.load(Ordering::Relaxed),
            total_calls: self.total_calls.load(Ordering::Relaxed),
            total_failed_calls: self.total_failed_calls.load(Ordering::Relaxed),
            requests_by_peer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn counts_sessions_and_calls() {
        let stats = ServerStats::new();
        let local = IpAddr::V4(Ipv4Addr::LOCALHOST);

        stats.session_opened();
        stats.session_opened();
        stats.session_closed();
        stats.record_call(local, false);
        stats.record_call(local, true);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.total_sessions, 2);
        assert_eq!(snapshot.active_sessions, 1);
        assert_eq!(snapshot.total_calls, 2);
        assert_eq!(snapshot.total_failed_calls, 1);
        assert_eq!(snapshot.requests_by_peer.get(&local), Some(&2));
    }

    #[test]
    fn renders_counters_on_one_line() {
        let snapshot = StatsSnapshot {
            uptime: Duration::from_millis(1_500),
            total_sessions: 3,
            active_sessions: 1,
            total_calls: 7,
            total_failed_calls: 2,
            requests_by_peer: BTreeMap::from([
                (IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)), 3),
                (IpAddr::V4(Ipv4Addr::LOCALHOST), 4),
            ]),
        };

        assert_eq!(
            snapshot.to_string(),
            "uptime=1.500s sessions=3 active=1 calls=7 failed=2 peers=[10.0.0.2:3,127.0.0.1:4]"
        );
    }

    #[test]
    fn unmatched_close_does_not_underflow() {
        let stats = ServerStats::new();
        stats.session_closed();
        assert_eq!(stats.snapshot().active_sessions, 0);
    }
}
