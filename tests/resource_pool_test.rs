//! Integration tests for the idle-resource pool.

use corral::config::ResourcePoolConfig;
use corral::core::{AppResult, Closable, ResourcePool};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A fake connection with a unique id and a shared close counter.
struct Conn {
    id: usize,
    closes: Arc<AtomicUsize>,
}

impl Closable for Conn {
    fn close(self) -> AppResult<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct Fixture {
    created: Arc<AtomicUsize>,
    closes: Arc<AtomicUsize>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            created: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn pool(&self, capacity: usize) -> ResourcePool<Conn, impl Fn() -> AppResult<Conn>> {
        let created = Arc::clone(&self.created);
        let closes = Arc::clone(&self.closes);
        let factory = move || {
            let id = created.fetch_add(1, Ordering::SeqCst);
            Ok(Conn {
                id,
                closes: Arc::clone(&closes),
            })
        };
        ResourcePool::new(factory, ResourcePoolConfig::new(capacity)).unwrap()
    }
}

#[test]
fn empty_pool_creates_through_the_factory_every_time() {
    let fixture = Fixture::new();
    let pool = fixture.pool(2);

    // No releases in between: the idle store stays empty, so each acquire
    // must hit the factory and yield a distinct resource.
    let a = pool.acquire().unwrap();
    let b = pool.acquire().unwrap();
    let c = pool.acquire().unwrap();

    assert_eq!(fixture.created.load(Ordering::SeqCst), 3);
    let ids: HashSet<usize> = [a.id, b.id, c.id].into_iter().collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn capacity_bounds_idle_retention_not_outstanding_resources() {
    let fixture = Fixture::new();
    let pool = fixture.pool(2);

    let a = pool.acquire().unwrap();
    let b = pool.acquire().unwrap();
    let c = pool.acquire().unwrap();

    // Two fit in the idle store; the third is shed and closed exactly once.
    pool.release(a);
    pool.release(b);
    pool.release(c);
    assert_eq!(fixture.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn close_drains_every_idle_resource_exactly_once() {
    let fixture = Fixture::new();
    let pool = fixture.pool(3);

    // Hold three distinct resources before releasing, so the idle store ends
    // up with three entries rather than recycling one.
    let conns: Vec<Conn> = (0..3).map(|_| pool.acquire().unwrap()).collect();
    for conn in conns {
        pool.release(conn);
    }

    pool.close();
    assert_eq!(fixture.closes.load(Ordering::SeqCst), 3);

    // Second close is a no-op.
    pool.close();
    assert_eq!(fixture.closes.load(Ordering::SeqCst), 3);
}

#[test]
fn release_after_close_sheds_immediately() {
    let fixture = Fixture::new();
    let pool = fixture.pool(2);

    let conn = pool.acquire().unwrap();
    pool.close();

    pool.release(conn);
    assert_eq!(fixture.closes.load(Ordering::SeqCst), 1);
}

#[test]
fn acquired_resource_is_released_at_most_once() {
    // Documented precondition: each acquired resource flows through release
    // exactly once. Ownership enforces it: release consumes the handle, so
    // the single-release flow is the only one that compiles.
    let fixture = Fixture::new();
    let pool = fixture.pool(1);

    let conn = pool.acquire().unwrap();
    pool.release(conn);

    let reused = pool.acquire().unwrap();
    assert_eq!(reused.id, 0);
    assert_eq!(fixture.created.load(Ordering::SeqCst), 1);
}

#[test]
fn shed_close_failure_is_swallowed() {
    struct Flaky;
    impl Closable for Flaky {
        fn close(self) -> AppResult<()> {
            Err(anyhow::anyhow!("close failed"))
        }
    }

    let pool = ResourcePool::new(
        || Ok(Flaky),
        ResourcePoolConfig::new(1),
    )
    .unwrap();

    let a = pool.acquire().unwrap();
    let b = pool.acquire().unwrap();
    pool.release(a);
    // Idle store full: b is shed and its close error swallowed.
    pool.release(b);
    pool.close();
}
