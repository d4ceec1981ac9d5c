//! Memoized view assembly
//!
//! Entries are keyed by viewer and snapshot fingerprint, so a snapshot with
//! any new row misses. Entries older than `max_age` are rebuilt even when the
//! fingerprint matches, and are dropped whenever a new view is stored. Fetch
//! failures are never answered from the cache.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{
    build_student_view, build_teacher_view, StudentView, TeacherView, ViewContext, ViewError,
};
use crate::config::FeedSettings;
use crate::domain::Snapshot;
use crate::source::SourceError;

struct Entry<T> {
    fingerprint: u64,
    built_at: Instant,
    view: T,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Default)]
struct Inner {
    students: HashMap<ViewContext, Entry<StudentView>>,
    teachers: HashMap<ViewContext, Entry<TeacherView>>,
    stats: CacheStats,
}

type Slot<T> = fn(&mut Inner) -> &mut HashMap<ViewContext, Entry<T>>;

/// Cache of assembled views, owned by whoever drives the pipeline
pub struct ViewCache {
    max_age: Duration,
    feed: FeedSettings,
    inner: Mutex<Inner>,
}

impl ViewCache {
    pub fn new(max_age: Duration, feed: FeedSettings) -> Self {
        Self {
            max_age,
            feed,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn student_view(
        &self,
        ctx: &ViewContext,
        fetched: Result<Snapshot, SourceError>,
    ) -> Result<StudentView, ViewError> {
        let snapshot = fetched?;
        self.get_or_build(ctx, &snapshot, |inner| &mut inner.students, |s| {
            build_student_view(ctx, s, &self.feed)
        })
    }

    pub fn teacher_view(
        &self,
        ctx: &ViewContext,
        fetched: Result<Snapshot, SourceError>,
    ) -> Result<TeacherView, ViewError> {
        let snapshot = fetched?;
        self.get_or_build(ctx, &snapshot, |inner| &mut inner.teachers, |s| {
            build_teacher_view(ctx, s, &self.feed)
        })
    }

    /// Drop every entry
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.students.clear();
        inner.teachers.clear();
    }

    pub fn len(&self) -> usize {
        let inner = self.lock();
        inner.students.len() + inner.teachers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_or_build<T, F>(
        &self,
        ctx: &ViewContext,
        snapshot: &Snapshot,
        slot: Slot<T>,
        build: F,
    ) -> Result<T, ViewError>
    where
        T: Clone,
        F: FnOnce(&Snapshot) -> Result<T, ViewError>,
    {
        let fingerprint = snapshot.fingerprint();

        {
            let mut inner = self.lock();
            let fresh = slot(&mut inner).get(ctx).and_then(|entry| {
                (entry.fingerprint == fingerprint && entry.built_at.elapsed() < self.max_age)
                    .then(|| entry.view.clone())
            });
            if let Some(view) = fresh {
                inner.stats.hits += 1;
                return Ok(view);
            }
            inner.stats.misses += 1;
        }

        // Build outside the lock; assembly is pure so a racing build is harmless
        let view = build(snapshot)?;
        debug!(user = %ctx.user_id, fingerprint, "cached view rebuilt");

        if !self.max_age.is_zero() {
            let mut inner = self.lock();
            let entries = slot(&mut inner);
            let before = entries.len();
            entries.retain(|_, entry| entry.built_at.elapsed() < self.max_age);
            if entries.len() < before {
                debug!(pruned = before - entries.len(), "dropped expired views");
            }
            entries.insert(
                ctx.clone(),
                Entry {
                    fingerprint,
                    built_at: Instant::now(),
                    view: view.clone(),
                },
            );
        }
        Ok(view)
    }
}
