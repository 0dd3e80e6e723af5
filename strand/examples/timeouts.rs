//! Bounding a slow computation with `timeout`, and racing two sleeps.

use strand::future::{Either, race};
use strand::time::{sleep, timeout};

use std::time::Duration;

async fn slow(name: &'static str, ms: u64) -> &'static str {
    sleep(Duration::from_millis(ms)).await;
    name
}

#[strand::main(worker_threads = 2)]
async fn main() {
    env_logger::init();

    match timeout(Duration::from_secs(2), slow("slow", 5000)).await {
        Ok(message) => println!("Succeeded with '{message}'"),
        Err(elapsed) => println!("Failed after {} seconds", elapsed.duration().as_secs()),
    }

    let winner = match race(slow("left", 300), slow("right", 100)).await {
        Either::Left(name) | Either::Right(name) => name,
    };
    println!("'{winner}' finished first");
}
