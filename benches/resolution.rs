//! Benchmark: Resolution performance (singleton cache hit vs transient wiring)

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::sync::Arc;
use wirebox::{Container, Dependency, Injectable, Registration, ResolutionError, Resolver};

// Benchmark fixture: leaf service with no dependencies
#[allow(dead_code)]
struct Database {
	url: String,
}

impl Injectable for Database {
	fn wire(_resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
		Ok(Database {
			url: "postgres://localhost/bench".to_string(),
		})
	}
}

// Benchmark fixture: mid-tier service with one dependency
#[allow(dead_code)]
struct Repository {
	db: Arc<Database>,
}

impl Injectable for Repository {
	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
		Ok(Repository {
			db: resolver.dependency::<Database>("db")?,
		})
	}

	fn dependencies() -> Vec<Dependency> {
		vec![Dependency::of::<Database>("db")]
	}
}

// Benchmark fixture: top-level service driving a three-deep graph
#[allow(dead_code)]
struct Service {
	repo: Arc<Repository>,
}

impl Injectable for Service {
	fn wire(resolver: &mut Resolver<'_>) -> Result<Self, ResolutionError> {
		Ok(Service {
			repo: resolver.dependency::<Repository>("repo")?,
		})
	}

	fn dependencies() -> Vec<Dependency> {
		vec![Dependency::of::<Repository>("repo")]
	}
}

fn register_graph(container: &Container, transient: bool) {
	let registrations = [
		Registration::of::<Database>(),
		Registration::of::<Repository>(),
		Registration::of::<Service>(),
	];
	for registration in registrations {
		let registration = if transient {
			registration.transient()
		} else {
			registration
		};
		container.register(registration).unwrap();
	}
}

fn benchmark_singleton_cache_hit(c: &mut Criterion) {
	let container = Container::new();
	register_graph(&container, false);

	// Warm the caches so every measured resolve is a hit
	let _ = container.resolve::<Service>().unwrap();

	c.bench_function("singleton_cache_hit", |b| {
		b.iter(|| black_box(container.resolve::<Service>().unwrap()));
	});
}

fn benchmark_transient_graph_wiring(c: &mut Criterion) {
	let container = Container::new();
	register_graph(&container, true);

	c.bench_function("transient_graph_wiring", |b| {
		b.iter(|| black_box(container.resolve::<Service>().unwrap()));
	});
}

fn benchmark_qualified_resolution(c: &mut Criterion) {
	struct Logger;

	let container = Container::new();
	for qualifier in ["console", "file", "syslog"] {
		container
			.register(
				Registration::factory(|_: &mut Resolver<'_>| Ok(Logger)).qualified(qualifier),
			)
			.unwrap();
	}
	let _ = container.resolve_qualified::<Logger>("file").unwrap();

	c.bench_function("qualified_cache_hit", |b| {
		b.iter(|| black_box(container.resolve_qualified::<Logger>("file").unwrap()));
	});
}

criterion_group!(
	benches,
	benchmark_singleton_cache_hit,
	benchmark_transient_graph_wiring,
	benchmark_qualified_resolution
);
criterion_main!(benches);
