mod common;

use common::UNIT;
use strand::stream::{self, ReceiverStream, StreamExt};
use strand::sync::channel;
use strand::task;
use strand::time::sleep;

use std::pin::pin;
use std::time::Instant;

#[strand::test]
async fn receiver_stream_yields_messages_then_ends() {
    let (tx, rx) = channel();

    task::spawn(async move {
        for word in ["a", "b", "c"] {
            tx.send(word).unwrap();
            sleep(UNIT / 5).await;
        }
    });

    let mut words = ReceiverStream::new(rx);
    let mut seen = Vec::new();
    while let Some(word) = words.next().await {
        seen.push(word);
    }

    assert_eq!(seen, ["a", "b", "c"]);
    assert_eq!(words.next().await, None);
}

#[strand::test]
async fn closed_receiver_stream_still_yields_buffered() {
    let (tx, rx) = channel();
    tx.send(1).unwrap();
    tx.send(2).unwrap();

    let mut numbers = ReceiverStream::from(rx);
    numbers.close();

    assert!(tx.send(3).is_err());
    assert_eq!(numbers.next().await, Some(1));
    assert_eq!(numbers.next().await, Some(2));
    assert_eq!(numbers.next().await, None);
}

#[strand::test]
async fn map_and_take_stop_an_open_channel() {
    let (tx, rx) = channel();

    for count in 1..=5u32 {
        tx.send(count).unwrap();
    }

    let mut labels = ReceiverStream::new(rx)
        .map(|count| format!("Interval #{count}"))
        .take(3);

    let mut seen = Vec::new();
    while let Some(label) = labels.next().await {
        seen.push(label);
    }

    // `tx` is still alive: only `take` ends the stream.
    assert!(!tx.is_closed());
    assert_eq!(seen, ["Interval #1", "Interval #2", "Interval #3"]);
}

#[strand::test]
async fn take_zero_is_empty() {
    let mut nothing = stream::iter([1, 2, 3]).take(0);

    assert_eq!(nothing.next().await, None);
}

#[strand::test]
async fn merge_alternates_between_ready_streams() {
    let mut merged = stream::iter([1, 2, 3]).merge(stream::iter([10, 20]));

    let mut seen = Vec::new();
    while let Some(n) = merged.next().await {
        seen.push(n);
    }

    assert_eq!(seen, [1, 10, 2, 20, 3]);
}

#[strand::test]
async fn merge_ends_when_both_channels_close() {
    let (fast_tx, fast_rx) = channel();
    let (slow_tx, slow_rx) = channel();

    task::spawn(async move {
        for i in 0..4 {
            fast_tx.send(format!("fast {i}")).unwrap();
            sleep(UNIT / 5).await;
        }
    });

    task::spawn(async move {
        for i in 0..2 {
            sleep(UNIT).await;
            slow_tx.send(format!("slow {i}")).unwrap();
        }
    });

    let merged = ReceiverStream::new(fast_rx).merge(ReceiverStream::new(slow_rx));
    let mut merged = pin!(merged);

    let mut seen = Vec::new();
    while let Some(message) = merged.next().await {
        seen.push(message);
    }

    let fast: Vec<_> = seen.iter().filter(|m| m.starts_with("fast")).collect();
    let slow: Vec<_> = seen.iter().filter(|m| m.starts_with("slow")).collect();

    assert_eq!(fast, ["fast 0", "fast 1", "fast 2", "fast 3"]);
    assert_eq!(slow, ["slow 0", "slow 1"]);
}

#[strand::test]
async fn timeout_reports_gaps_and_keeps_going() {
    common::init_logging();

    let (tx, rx) = channel();

    task::spawn(async move {
        tx.send("a").unwrap();
        sleep(UNIT * 5 / 2).await;
        tx.send("b").unwrap();
    });

    let mut messages = ReceiverStream::new(rx).timeout(UNIT);

    let mut seen = Vec::new();
    while let Some(result) = messages.next().await {
        seen.push(result);
    }

    assert_eq!(seen.first(), Some(&Ok("a")));
    assert_eq!(seen.last(), Some(&Ok("b")));

    let gaps = &seen[1..seen.len() - 1];
    assert!(!gaps.is_empty());
    for gap in gaps {
        let elapsed = gap.expect_err("only timeouts between the two messages");
        assert_eq!(elapsed.duration(), UNIT);
    }
}

#[strand::test]
async fn throttle_spaces_items_out() {
    let start = Instant::now();
    let mut ticks = stream::iter(0..4).throttle(UNIT);

    let mut seen = Vec::new();
    while let Some(tick) = ticks.next().await {
        seen.push((tick, start.elapsed()));
    }

    let order: Vec<_> = seen.iter().map(|(tick, _)| *tick).collect();
    assert_eq!(order, [0, 1, 2, 3]);

    for (index, (_, at)) in seen.iter().enumerate() {
        assert!(*at >= UNIT * index as u32);
    }
}

#[strand::test]
async fn pipeline_of_adapters() {
    let (tx, rx) = channel();

    task::spawn(async move {
        let mut count = 0;
        loop {
            sleep(UNIT / 25).await;
            count += 1;
            if tx.send(count).is_err() {
                break;
            }
        }
    });

    let intervals = ReceiverStream::new(rx)
        .map(|count| format!("Interval #{count}"))
        .throttle(UNIT / 5)
        .timeout(UNIT * 10);

    let mut merged = pin!(stream::iter(["start".to_string()].map(Ok)).merge(intervals).take(4));

    let mut seen = Vec::new();
    while let Some(result) = merged.next().await {
        seen.push(result.unwrap());
    }

    assert_eq!(seen.len(), 4);
    assert_eq!(seen[0], "start");
    assert!(seen[1..].iter().all(|item| item.starts_with("Interval #")));
}
