use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::session::GameSession;

struct StoredGame {
    session: GameSession,
    touched: Instant,
}

impl StoredGame {
    /// A session is kept while it is running, or until it has sat
    /// finished or unplayed for longer than `retention`.
    fn is_stale(&mut self, now: Instant, retention: Duration) -> bool {
        let idle = now.saturating_duration_since(self.touched) >= retention;
        let finished = self.session.expire_if_due(now);
        let unplayed = self.session.turns().is_empty();

        idle && (finished || unplayed)
    }
}

/// In-memory sessions keyed by numeric id, for transports that host games
pub struct GameStore {
    games: HashMap<u64, StoredGame>,
    next_id: u64,
    retention: Duration,
}

impl GameStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            games: HashMap::new(),
            next_id: 1,
            retention,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Store a new session and hand back its id. Stale sessions are dropped first.
    pub fn insert_at(&mut self, session: GameSession, now: Instant) -> u64 {
        self.cleanup_at(now);

        let id = self.next_id;
        self.next_id += 1;
        self.games.insert(id, StoredGame { session, touched: now });
        id
    }

    /// Session by id, marking it as used. A stale session is dropped and reported missing.
    pub fn get_mut_at(&mut self, id: u64, now: Instant) -> Option<&mut GameSession> {
        let stale = self.games.get_mut(&id)?.is_stale(now, self.retention);
        if stale {
            self.games.remove(&id);
            tracing::debug!("Game {} evicted on access", id);
            return None;
        }

        let stored = self.games.get_mut(&id)?;
        stored.touched = now;
        Some(&mut stored.session)
    }

    pub fn remove(&mut self, id: u64) -> Option<GameSession> {
        self.games.remove(&id).map(|stored| stored.session)
    }

    /// Drop finished or abandoned sessions past the retention window.
    /// Returns the number removed.
    pub fn cleanup_at(&mut self, now: Instant) -> usize {
        let before = self.games.len();
        let retention = self.retention;
        self.games.retain(|_, stored| !stored.is_stale(now, retention));

        let removed = before - self.games.len();
        if removed > 0 {
            tracing::debug!("Evicted {} stale games", removed);
        }
        removed
    }
}
