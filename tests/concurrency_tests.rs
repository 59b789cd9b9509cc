//! Concurrent resolution behavior across threads sharing one container.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use wirebox::{Container, Registration, Resolver};

struct Connection {
	id: usize,
}

#[test]
fn singleton_factory_runs_at_most_once_under_contention() {
	const THREADS: usize = 16;

	let invocations = Arc::new(AtomicUsize::new(0));
	let container = Arc::new(Container::new());

	let counter = Arc::clone(&invocations);
	container
		.register(Registration::factory(move |_: &mut Resolver<'_>| {
			let id = counter.fetch_add(1, Ordering::SeqCst);
			Ok(Connection { id })
		}))
		.unwrap();

	let barrier = Arc::new(Barrier::new(THREADS));
	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let container = Arc::clone(&container);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				container.resolve::<Connection>().unwrap()
			})
		})
		.collect();

	let resolved: Vec<Arc<Connection>> =
		handles.into_iter().map(|h| h.join().unwrap()).collect();

	assert_eq!(invocations.load(Ordering::SeqCst), 1);
	for conn in &resolved[1..] {
		assert!(Arc::ptr_eq(&resolved[0], conn));
		assert_eq!(conn.id, resolved[0].id);
	}
}

#[test]
fn transient_resolution_is_distinct_per_thread() {
	const THREADS: usize = 8;

	let invocations = Arc::new(AtomicUsize::new(0));
	let container = Arc::new(Container::new());

	let counter = Arc::clone(&invocations);
	container
		.register(
			Registration::factory(move |_: &mut Resolver<'_>| {
				let id = counter.fetch_add(1, Ordering::SeqCst);
				Ok(Connection { id })
			})
			.transient(),
		)
		.unwrap();

	let barrier = Arc::new(Barrier::new(THREADS));
	let handles: Vec<_> = (0..THREADS)
		.map(|_| {
			let container = Arc::clone(&container);
			let barrier = Arc::clone(&barrier);
			thread::spawn(move || {
				barrier.wait();
				container.resolve::<Connection>().unwrap().id
			})
		})
		.collect();

	let mut ids: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
	ids.sort_unstable();
	ids.dedup();

	assert_eq!(ids.len(), THREADS);
	assert_eq!(invocations.load(Ordering::SeqCst), THREADS);
}

#[test]
fn concurrent_register_and_resolve_do_not_interleave_badly() {
	struct Tag(&'static str);

	let container = Arc::new(Container::new());
	container
		.register(Registration::value(Tag("initial")))
		.unwrap();

	let barrier = Arc::new(Barrier::new(2));

	let writer = {
		let container = Arc::clone(&container);
		let barrier = Arc::clone(&barrier);
		thread::spawn(move || {
			barrier.wait();
			for _ in 0..100 {
				container
					.register(Registration::value(Tag("replaced")))
					.unwrap();
			}
		})
	};

	let reader = {
		let container = Arc::clone(&container);
		let barrier = Arc::clone(&barrier);
		thread::spawn(move || {
			barrier.wait();
			for _ in 0..100 {
				// which generation we observe is timing-dependent,
				// but every resolution must succeed
				let tag = container.resolve::<Tag>().unwrap();
				assert!(tag.0 == "initial" || tag.0 == "replaced");
			}
		})
	};

	writer.join().unwrap();
	reader.join().unwrap();

	assert_eq!(container.resolve::<Tag>().unwrap().0, "replaced");
}
