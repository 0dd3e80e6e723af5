//! Two counting computations interleaved with `join`.
//!
//! Run with `RUST_LOG=debug` to see the runtime's lifecycle logs.

use strand::future::join;
use strand::time::sleep;

use std::time::Duration;

#[strand::main]
async fn main() {
    env_logger::init();

    let first = async {
        for i in 1..10 {
            println!("hi number {i} from the first task!");
            sleep(Duration::from_millis(500)).await;
        }
    };

    let second = async {
        for i in 1..5 {
            println!("hi number {i} from the second task!");
            sleep(Duration::from_millis(500)).await;
        }
    };

    join(first, second).await;
}
