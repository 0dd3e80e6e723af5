//! Merging a message stream with a throttled interval stream.

use strand::stream::{ReceiverStream, Stream, StreamExt};
use strand::sync::channel;
use strand::task;
use strand::time::sleep;

use std::pin::pin;
use std::time::Duration;

fn get_messages() -> impl Stream<Item = String> {
    let (tx, rx) = channel();

    task::spawn(async move {
        let messages = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"];

        for (index, message) in messages.into_iter().enumerate() {
            let time_to_sleep = if index % 2 == 0 { 100 } else { 300 };
            sleep(Duration::from_millis(time_to_sleep)).await;

            if let Err(error) = tx.send(format!("Message: '{message}'")) {
                eprintln!("Cannot send message '{message}': {error}");
                break;
            }
        }
    });

    ReceiverStream::new(rx)
}

fn get_intervals() -> impl Stream<Item = u32> {
    let (tx, rx) = channel();

    task::spawn(async move {
        let mut count = 0;
        loop {
            sleep(Duration::from_millis(1)).await;
            count += 1;

            if let Err(error) = tx.send(count) {
                eprintln!("Could not send interval {count}: {error}");
                break;
            }
        }
    });

    ReceiverStream::new(rx)
}

#[strand::main]
async fn main() {
    env_logger::init();

    let messages = get_messages().timeout(Duration::from_millis(200));
    let intervals = get_intervals()
        .map(|count| format!("Interval #{count}"))
        .throttle(Duration::from_millis(500))
        .timeout(Duration::from_secs(10));

    let mut merged = pin!(messages.merge(intervals).take(20));

    while let Some(result) = merged.next().await {
        match result {
            Ok(item) => println!("{item}"),
            Err(reason) => eprintln!("Problem: {reason:?}"),
        }
    }
}
