use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use orderflow_core::{CustomerId, ProductId};
use orderflow_events::InMemoryDispatcher;
use orderflow_infra::InMemoryOrderStore;
use orderflow_orders::{OrderEvent, OrderService, OrderStatus};

/// Naive CRUD simulation: direct key-value updates (no ports, no events).
#[derive(Debug, Clone)]
struct NaiveOrderStore {
    inner: Arc<RwLock<HashMap<Uuid, NaiveOrder>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NaiveOrder {
    customer_id: Uuid,
    status: OrderStatus,
}

impl NaiveOrderStore {
    fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn create(&self, customer_id: Uuid) -> Uuid {
        let order_id = Uuid::now_v7();
        let mut map = self.inner.write().unwrap();
        map.insert(
            order_id,
            NaiveOrder {
                customer_id,
                status: OrderStatus::Open,
            },
        );
        order_id
    }

    fn set_status(&self, order_id: Uuid, status: OrderStatus) -> Result<(), ()> {
        let mut map = self.inner.write().unwrap();
        match map.get_mut(&order_id) {
            Some(order) => {
                order.status = status;
                Ok(())
            }
            None => Err(()),
        }
    }
}

fn setup_service() -> (
    OrderService<Arc<InMemoryOrderStore>, Arc<InMemoryDispatcher<OrderEvent>>>,
    CustomerId,
) {
    let store = Arc::new(InMemoryOrderStore::new());
    let dispatcher: Arc<InMemoryDispatcher<OrderEvent>> = Arc::new(InMemoryDispatcher::new());
    (OrderService::new(store, dispatcher), CustomerId::new())
}

fn bench_operation_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("operation_latency");
    group.sample_size(1000);

    // Benchmark: CreateOrder (no prior state)
    group.bench_function("create_order", |b| {
        let (service, customer_id) = setup_service();
        b.iter(|| {
            service.create_order(black_box(customer_id)).unwrap();
        });
    });

    // Benchmark: SetStatus on an existing order (load + store round trip)
    group.bench_function("set_status_existing_order", |b| {
        let (service, customer_id) = setup_service();
        let order_id = service.create_order(customer_id).unwrap();

        b.iter(|| {
            service
                .set_status(order_id, black_box(OrderStatus::Paid))
                .unwrap();
        });
    });

    group.finish();
}

fn bench_item_mutation_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("item_mutation_round_trip");

    for item_count in [1, 10, 100].iter() {
        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("add_then_remove_item", item_count),
            item_count,
            |b, &count| {
                let (service, customer_id) = setup_service();
                let order_id = service.create_order(customer_id).unwrap();

                // Pre-populate the order so each iteration works at this size.
                for i in 0..count {
                    service
                        .add_item(order_id, ProductId::new(), (i as u64) * 100)
                        .unwrap();
                }

                b.iter(|| {
                    let item_id = service
                        .add_item(order_id, ProductId::new(), black_box(2_500))
                        .unwrap();
                    service.delete_item(order_id, item_id).unwrap();
                });
            },
        );
    }

    group.finish();
}

fn bench_service_vs_naive_crud(c: &mut Criterion) {
    let mut group = c.benchmark_group("service_vs_naive_crud");
    group.sample_size(1000);

    // Benchmark: full pipeline (repository port + event dispatch)
    group.bench_function("service_create_and_pay", |b| {
        let (service, customer_id) = setup_service();

        b.iter(|| {
            let order_id = service.create_order(customer_id).unwrap();
            service.set_status(order_id, OrderStatus::Paid).unwrap();
        });
    });

    // Benchmark: direct map mutation (baseline without the pipeline)
    group.bench_function("naive_create_and_pay", |b| {
        let store = NaiveOrderStore::new();
        let customer_id = Uuid::now_v7();

        b.iter(|| {
            let order_id = store.create(black_box(customer_id));
            store.set_status(order_id, OrderStatus::Paid).unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_operation_latency,
    bench_item_mutation_round_trip,
    bench_service_vs_naive_crud
);
criterion_main!(benches);
