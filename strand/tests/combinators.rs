mod common;

use common::UNIT;
use strand::future::{Either, join, join3, join_all, race};
use strand::sync::channel;
use strand::time::sleep;
use strand::yield_now;

use std::time::Duration;

#[strand::test]
async fn join_returns_outputs_in_input_order() {
    let slow = async {
        sleep(UNIT * 2).await;
        "slow"
    };
    let fast = async { "fast" };

    assert_eq!(join(slow, fast).await, ("slow", "fast"));
}

#[strand::test]
async fn join3_ignores_completion_order() {
    let (a, b, c) = join3(
        async {
            sleep(Duration::from_millis(30)).await;
            1
        },
        async {
            sleep(Duration::from_millis(10)).await;
            2
        },
        async {
            sleep(Duration::from_millis(20)).await;
            3
        },
    )
    .await;

    assert_eq!((a, b, c), (1, 2, 3));
}

#[strand::test]
async fn join_all_preserves_input_order() {
    let delays = [40u64, 0, 25, 5, 15];

    let futures = delays.iter().enumerate().map(|(index, &ms)| async move {
        sleep(Duration::from_millis(ms)).await;
        index
    });

    assert_eq!(join_all(futures).await, vec![0, 1, 2, 3, 4]);
}

#[strand::test]
async fn join_all_of_nothing_is_empty() {
    let futures: Vec<std::future::Ready<u8>> = Vec::new();
    let joined = join_all(futures);

    assert!(joined.is_empty());
    assert!(joined.await.is_empty());
}

#[strand::test]
async fn join_all_treats_ready_children_like_pending_ones() {
    let ready = [1, 2, 3].map(std::future::ready);
    let joined = join_all(ready);

    assert_eq!(joined.len(), 3);
    assert!(!joined.is_empty());
    assert_eq!(joined.await, vec![1, 2, 3]);
}

#[strand::test]
async fn join_polls_children_round_robin() {
    let (tx, mut rx) = channel();
    let tx_b = tx.clone();

    let a = async move {
        for i in 0..3 {
            tx.send(("a", i)).unwrap();
            yield_now().await;
        }
    };

    let b = async move {
        for i in 0..3 {
            tx_b.send(("b", i)).unwrap();
            yield_now().await;
        }
    };

    join(a, b).await;

    let mut order = Vec::new();
    while let Some(entry) = rx.recv().await {
        order.push(entry);
    }

    assert_eq!(
        order,
        vec![("a", 0), ("b", 0), ("a", 1), ("b", 1), ("a", 2), ("b", 2)]
    );
}

/// Sends `(label, 0..rounds)` through `tx`, yielding after each send.
async fn step(label: &'static str, rounds: usize, tx: strand::sync::Sender<(&'static str, usize)>) {
    for i in 0..rounds {
        tx.send((label, i)).unwrap();
        yield_now().await;
    }
}

#[strand::test]
async fn join3_polls_children_round_robin() {
    let (tx, mut rx) = channel();

    join3(
        step("a", 2, tx.clone()),
        step("b", 3, tx.clone()),
        step("c", 1, tx),
    )
    .await;

    let mut order = Vec::new();
    while let Some(entry) = rx.recv().await {
        order.push(entry);
    }

    assert_eq!(
        order,
        vec![("a", 0), ("b", 0), ("c", 0), ("a", 1), ("b", 1), ("b", 2)]
    );
}

#[strand::test]
async fn join_macro_polls_children_round_robin() {
    let (tx, mut rx) = channel();

    strand::join!(
        step("a", 3, tx.clone()),
        step("b", 2, tx.clone()),
        step("c", 2, tx.clone()),
        step("d", 1, tx),
    );

    let mut order = Vec::new();
    while let Some(entry) = rx.recv().await {
        order.push(entry);
    }

    assert_eq!(
        order,
        vec![
            ("a", 0),
            ("b", 0),
            ("c", 0),
            ("d", 0),
            ("a", 1),
            ("b", 1),
            ("c", 1),
            ("a", 2),
        ]
    );
}

#[strand::test]
async fn join_all_polls_every_child_once_per_cycle() {
    let (tx, mut rx) = channel();

    let children = (0..3).map(|id| {
        let tx = tx.clone();
        async move {
            for round in 0..2 {
                tx.send((round, id)).unwrap();
                yield_now().await;
            }
        }
    });

    join_all(children).await;
    drop(tx);

    let mut order = Vec::new();
    while let Some(entry) = rx.recv().await {
        order.push(entry);
    }

    assert_eq!(
        order,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
}

#[strand::test]
async fn counting_tasks_alternate_under_join() {
    let (tx, mut rx) = channel();
    let tx_second = tx.clone();

    let first = async move {
        for i in 1..=5 {
            tx.send(format!("hi number {i} from the first task!")).unwrap();
            sleep(UNIT).await;
        }
    };

    let second = async move {
        for i in 1..=5 {
            tx_second
                .send(format!("hi number {i} from the second task!"))
                .unwrap();
            sleep(UNIT).await;
        }
    };

    join(first, second).await;

    let mut lines = Vec::new();
    while let Some(line) = rx.recv().await {
        lines.push(line);
    }

    let expected: Vec<String> = (1..=5)
        .flat_map(|i| {
            [
                format!("hi number {i} from the first task!"),
                format!("hi number {i} from the second task!"),
            ]
        })
        .collect();

    assert_eq!(lines, expected);
}

#[strand::test]
async fn race_returns_first_finisher() {
    let slow = async {
        sleep(UNIT * 4).await;
        "slow"
    };
    let fast = async {
        sleep(UNIT).await;
        "fast"
    };

    let winner = race(slow, fast).await;

    assert!(winner.is_right());
    assert_eq!(winner, Either::Right("fast"));
    assert_eq!(winner.right(), Some("fast"));
}

#[strand::test]
async fn race_prefers_left_when_both_ready() {
    let result = race(async { 1 }, async { 2 }).await;

    assert!(result.is_left());
    assert!(!result.is_right());
    assert_eq!(result.right(), None);
    assert_eq!(result.left(), Some(1));
}
