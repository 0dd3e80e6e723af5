//! Several producers sending through one channel while a consumer prints
//! messages as they arrive.

use strand::sync::channel;
use strand::time::sleep;

use std::time::Duration;

#[strand::main]
async fn main() {
    env_logger::init();

    let (tx, mut rx) = channel();
    let tx1 = tx.clone();

    let tx1_fut = async move {
        for val in ["hi", "from", "the", "future"] {
            tx1.send(val.to_string()).unwrap();
            sleep(Duration::from_millis(500)).await;
        }
    };

    let rx_fut = async {
        while let Some(value) = rx.recv().await {
            println!("received '{value}'");
        }
    };

    let tx_fut = async move {
        for val in ["more", "messages", "for", "you"] {
            tx.send(val.to_string()).unwrap();
            sleep(Duration::from_millis(1500)).await;
        }
    };

    strand::join!(tx1_fut, tx_fut, rx_fut);
}
