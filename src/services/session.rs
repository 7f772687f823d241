// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store and the search workflow.
//!
//! The store is the single owner of session state. Map guards are never held
//! across an `.await`: callers take a snapshot or run a synchronous update.

use crate::error::{AppError, Result};
use crate::models::session::{ImageJob, Session};
use crate::services::{ImageService, SuggestionService};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Shared per-session UI state.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<Uuid, Session>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Create a new idle session and return a snapshot of it.
    pub fn create(&self) -> Session {
        let pruned = self.prune_expired();
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned idle sessions");
        }

        let session = Session::new();
        self.sessions.insert(session.id, session.clone());
        tracing::debug!(session_id = %session.id, "Session created");
        session
    }

    /// Snapshot of a session.
    pub fn get(&self, id: Uuid) -> Result<Session> {
        self.sessions
            .get(&id)
            .map(|s| s.clone())
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
    }

    /// Run a synchronous update against a session.
    pub fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
        Ok(f(entry.value_mut()))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle for longer than the TTL. Returns how many were removed.
    ///
    /// Removals are counted inside `retain` since other threads may insert
    /// into shards that have already been visited.
    pub fn prune_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let mut removed = 0;
        self.sessions.retain(|_, s| {
            let keep = s.updated_at() >= cutoff;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// Patch one card's photo if the session and card are still current.
    pub fn patch_photo(&self, id: Uuid, job: &ImageJob, photo_url: String) -> bool {
        self.update(id, |s| s.patch_photo(job.generation, &job.activity_id, photo_url))
            .unwrap_or(false)
    }
}

/// Run a search for a session and return the resulting snapshot.
///
/// Provider errors are recorded on the session (error state plus one
/// destructive notification) rather than returned. Image generation is
/// spawned per card after the results are stored.
pub async fn search_activities(
    store: &SessionStore,
    suggestions: &SuggestionService,
    images: &ImageService,
    id: Uuid,
) -> Result<Session> {
    let ticket = store.update(id, |s| s.begin_search())??;

    match suggestions.get_suggestions(&ticket.request).await {
        Ok(response) => {
            let jobs = store.update(id, |s| s.complete_search(ticket.generation, response))?;
            if let Some(jobs) = jobs {
                spawn_image_jobs(store.clone(), images.clone(), id, jobs);
            }
        }
        Err(e) => {
            tracing::warn!(session_id = %id, error = %e, "Search failed");
            store.update(id, |s| s.fail_search(ticket.generation, &e))?;
        }
    }

    store.get(id)
}

/// Launch one independent image task per card.
fn spawn_image_jobs(store: SessionStore, images: ImageService, id: Uuid, jobs: Vec<ImageJob>) {
    for job in jobs {
        let store = store.clone();
        let images = images.clone();
        tokio::spawn(async move {
            let Some(data_uri) = images.get_image(&job.keywords).await else {
                return;
            };
            if !store.patch_photo(id, &job, data_uri) {
                tracing::debug!(
                    session_id = %id,
                    activity_id = %job.activity_id,
                    "Discarded stale image"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_get_remove() {
        let store = SessionStore::new(chrono::Duration::minutes(5));
        let session = store.create();
        assert_eq!(store.get(session.id).unwrap().id, session.id);
        assert!(store.remove(session.id));
        assert!(matches!(store.get(session.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_update_unknown_session() {
        let store = SessionStore::new(chrono::Duration::minutes(5));
        let err = store.update(Uuid::new_v4(), |s| s.set_mood("Happy".into())).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_concurrent_create_while_pruning() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 2_000;

        let store = SessionStore::new(chrono::Duration::minutes(5));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        store.create();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("create panicked");
        }
        assert_eq!(store.len(), THREADS * PER_THREAD);
    }

    #[test]
    fn test_concurrent_prune_counts_only_expired() {
        let store = SessionStore::new(chrono::Duration::minutes(-1));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..1_000)
                        .map(|_| {
                            store.create();
                            store.prune_expired()
                        })
                        .sum::<usize>()
                })
            })
            .collect();

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let remaining = store.len();
        // Every session is expired at birth, so each one is pruned at most once.
        assert!(total + remaining <= 8_000, "pruned {} + remaining {}", total, remaining);
    }

    #[test]
    fn test_prune_expired_with_negative_ttl() {
        let store = SessionStore::new(chrono::Duration::minutes(-1));
        store.create();
        assert_eq!(store.len(), 1);
        assert_eq!(store.prune_expired(), 1);
        assert!(store.is_empty());
    }
}
