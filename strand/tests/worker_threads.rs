use strand::task::spawn;
use strand::{Runtime, RuntimeBuilder};

use std::sync::{Arc, Mutex};
use std::thread;

fn runtime(workers: usize) -> Runtime {
    RuntimeBuilder::new().worker_threads(workers).build().unwrap()
}

#[test]
fn test_single_worker_thread() {
    let rt = runtime(1);

    assert_eq!(rt.block_on(async { 42 }), 42);
}

#[test]
fn test_multiple_worker_threads() {
    let rt = runtime(4);

    assert_eq!(rt.block_on(async { 100 }), 100);
}

#[test]
fn test_worker_threads_parallel_execution() {
    let rt = runtime(4);

    let counter = Arc::new(Mutex::new(0));
    let results = Arc::new(Mutex::new(Vec::new()));

    let counter_clone = counter.clone();
    let results_clone = results.clone();

    let doubled = rt.block_on(async move {
        let handles: Vec<_> = (0..10)
            .map(|i| {
                let counter = counter_clone.clone();
                let results = results_clone.clone();

                spawn(async move {
                    *counter.lock().unwrap() += 1;
                    results.lock().unwrap().push(i);
                    i * 2
                })
            })
            .collect();

        let mut doubled = Vec::new();
        for handle in handles {
            doubled.push(handle.await.unwrap());
        }
        doubled
    });

    assert_eq!(*counter.lock().unwrap(), 10);
    assert_eq!(results.lock().unwrap().len(), 10);
    assert_eq!(doubled, (0..10).map(|i| i * 2).collect::<Vec<_>>());
}

#[test]
fn test_worker_threads_stress() {
    let rt = runtime(8);

    let counter = Arc::new(Mutex::new(0));
    let counter_clone = counter.clone();

    rt.block_on(async move {
        let handles: Vec<_> = (0..100)
            .map(|_| {
                let counter = counter_clone.clone();
                spawn(async move {
                    *counter.lock().unwrap() += 1;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
    });

    assert_eq!(*counter.lock().unwrap(), 100);
}

#[test]
fn test_worker_threads_max_parallelism() {
    let num_threads = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4);

    let rt = runtime(num_threads);

    let result = rt.block_on(async {
        let sum = Arc::new(Mutex::new(0));
        let handles: Vec<_> = (1..=10)
            .map(|i| {
                let sum = sum.clone();
                spawn(async move {
                    *sum.lock().unwrap() += i;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        *sum.lock().unwrap()
    });

    assert_eq!(result, 55);
}

#[test]
fn test_worker_thread_names() {
    let rt = RuntimeBuilder::new().thread_name("named").build().unwrap();

    let name = rt.block_on(async { thread::current().name().map(String::from) });

    assert_eq!(name.as_deref(), Some("named-worker-0"));
}

#[test]
#[should_panic(expected = "worker_threads must be > 0")]
fn test_zero_worker_threads_panics() {
    let _ = RuntimeBuilder::new().worker_threads(0);
}

#[test]
#[should_panic(expected = "cannot be called from a runtime worker thread")]
fn test_block_on_inside_worker_panics() {
    let rt = Arc::new(runtime(1));
    let inner = rt.clone();

    rt.block_on(async move {
        inner.block_on(async {});
    });
}

#[strand::test(worker_threads = 3)]
async fn test_attribute_worker_threads() {
    let handles: Vec<_> = (0..6).map(|i| spawn(async move { i + 1 })).collect();

    let mut total = 0;
    for handle in handles {
        total += handle.await.unwrap();
    }

    assert_eq!(total, 21);
}
