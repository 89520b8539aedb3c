use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

use apiary_kv_client::{ops, Key, MemoryCluster, StoreValue, UserKey};

fn seeded_cluster(count: usize) -> MemoryCluster {
    let cluster = MemoryCluster::new();
    for i in 0..count {
        let key = Key::new("test", "demo", UserKey::from(format!("user-{i}"))).unwrap();
        let bins = HashMap::from([("n".to_string(), StoreValue::Int(i as i64))]);
        cluster.put(&key, bins, 0);
    }
    cluster
}

fn benchmark_read_one(c: &mut Criterion) {
    let cluster = seeded_cluster(1000);
    let key = Key::new("test", "demo", UserKey::from("user-500")).unwrap();

    c.bench_function("read_one_hit", |b| {
        b.iter(|| {
            let outcome = ops::read_one(&cluster, None, black_box(&key)).unwrap();
            black_box(outcome);
        });
    });
}

fn benchmark_read_batch(c: &mut Criterion) {
    let cluster = seeded_cluster(1000);

    c.bench_function("read_batch_100", |b| {
        b.iter(|| {
            let user_keys: Vec<UserKey> = (0..100)
                .map(|i| UserKey::from(format!("user-{i}")))
                .collect();
            let records = ops::read_batch(&cluster, None, "test", "demo", user_keys).unwrap();
            black_box(records);
        });
    });
}

criterion_group!(benches, benchmark_read_one, benchmark_read_batch);
criterion_main!(benches);
