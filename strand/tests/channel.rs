mod common;

use common::UNIT;
use strand::future::join;
use strand::sync::{TryRecvError, channel};
use strand::task;
use strand::time::{sleep, timeout};

use std::time::{Duration, Instant};

#[strand::test]
async fn n_sends_then_drop_yield_n_messages_and_close() {
    common::init_logging();

    let (tx, mut rx) = channel();

    for i in 0..10 {
        tx.send(i).unwrap();
    }
    drop(tx);

    assert_eq!(rx.len(), 10);
    assert!(!rx.is_empty());

    let mut received = Vec::new();
    while let Some(value) = rx.recv().await {
        received.push(value);
    }

    assert_eq!(received, (0..10).collect::<Vec<_>>());
    assert!(rx.is_empty());
    assert_eq!(rx.recv().await, None);
}

#[strand::test]
async fn recv_stays_pending_while_a_sender_lives() {
    let (tx, mut rx) = channel::<u32>();

    assert!(timeout(UNIT, rx.recv()).await.is_err());

    tx.send(7).unwrap();
    assert_eq!(timeout(UNIT, rx.recv()).await, Ok(Some(7)));
}

#[strand::test]
async fn moved_sender_closes_channel_when_its_task_ends() {
    let (tx, mut rx) = channel();

    let producer = task::spawn(async move {
        sleep(Duration::from_millis(10)).await;
        tx.send("only").unwrap();
    });

    assert_eq!(rx.recv().await, Some("only"));
    assert_eq!(rx.recv().await, None);

    producer.await.unwrap();
}

#[strand::test]
async fn every_clone_must_end_before_close() {
    let (tx, mut rx) = channel();

    for id in 0..3u64 {
        let tx = tx.clone();
        task::spawn(async move {
            sleep(Duration::from_millis(5 * (id + 1))).await;
            tx.send(id).unwrap();
        });
    }
    drop(tx);

    let mut received = Vec::new();
    while let Some(id) = rx.recv().await {
        received.push(id);
    }

    received.sort();
    assert_eq!(received, vec![0, 1, 2]);
}

#[strand::test]
async fn concurrent_producer_is_observed_one_message_at_a_time() {
    let start = Instant::now();
    let (tx, mut rx) = channel();

    let producer = async move {
        for message in ["a", "b", "c"] {
            tx.send(message).unwrap();
            sleep(UNIT).await;
        }
    };

    let consumer = async {
        let mut seen = Vec::new();
        while let Some(message) = rx.recv().await {
            seen.push((message, start.elapsed()));
        }
        seen
    };

    let ((), seen) = join(producer, consumer).await;

    let messages: Vec<_> = seen.iter().map(|(message, _)| *message).collect();
    assert_eq!(messages, ["a", "b", "c"]);

    assert!(seen[0].1 < UNIT);
    assert!(seen[1].1 >= UNIT);
    assert!(seen[2].1 >= UNIT * 2);
}

#[strand::test]
async fn linear_producer_is_observed_all_at_once() {
    let start = Instant::now();
    let (tx, mut rx) = channel();

    for message in ["a", "b", "c"] {
        tx.send(message).unwrap();
        sleep(UNIT).await;
    }
    drop(tx);

    let mut seen = Vec::new();
    while let Some(message) = rx.recv().await {
        seen.push((message, start.elapsed()));
    }

    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|(_, at)| *at >= UNIT * 3));
}

#[strand::test]
async fn send_after_close_is_reported() {
    let (tx, mut rx) = channel();

    let producer = task::spawn(async move {
        let mut sent = 0;
        loop {
            if tx.send(sent).is_err() {
                break sent;
            }
            sent += 1;
            sleep(Duration::from_millis(1)).await;
        }
    });

    assert_eq!(rx.recv().await, Some(0));
    assert_eq!(rx.recv().await, Some(1));
    rx.close();

    let sent = producer.await.unwrap();
    assert!(sent >= 2);

    let mut drained = 2;
    while rx.try_recv().is_ok() {
        drained += 1;
    }

    assert_eq!(drained, sent);
    assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
}
