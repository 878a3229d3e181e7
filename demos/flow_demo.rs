// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::time::Duration;
use the_relay::config::{load_config, Config};
use the_relay::observability::init_tracing;
use the_relay::{sync, task, waterfall_task, Container, Continuation, Engine, Task};
use tokio::task::LocalSet;
use tokio::time::sleep;

/// Report `outcome` through `cont` after `ms` milliseconds
fn after<V: 'static, E: 'static>(cont: Continuation<V, E>, ms: u64, outcome: Result<V, E>) {
    tokio::task::spawn_local(async move {
        sleep(Duration::from_millis(ms)).await;
        cont.complete(outcome);
    });
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Optional config path as the first argument
    let cfg = match env::args().nth(1) {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    init_tracing(&cfg.logging)?;
    let engine = Engine::from_config(&cfg);

    println!("🚀 Relay flow demo");
    println!("═══════════════════");

    let numbers = Container::from(vec![1, 2, 3]);
    let doubled = sync::map(&numbers, |v, _, _| v * 2);
    println!("sync map:      {:?}", doubled);
    println!(
        "sync fold:     {}",
        sync::fold(&numbers, 100, |acc, v, _, _| acc + v)
    );

    LocalSet::new()
        .run_until(async {
            let delays = Container::from(vec![(20u64, 1), (10, 2), (30, 3)]);
            let kept = engine
                .filter(&delays, |cont: Continuation<bool, String>, v, _, _| {
                    let (ms, n) = *v;
                    after(cont, ms, Ok(n > 1));
                })
                .await?;
            println!("async filter:  {:?}", kept);

            let tasks: Container<Task<i32, String>> = Container::mapping([
                ("a", task(|cont| after(cont, 20, Ok(1)))),
                ("b", task(|cont| after(cont, 10, Ok(2)))),
            ]);
            println!("series:        {:?}", engine.series(tasks).await?);

            let chain = Container::from(vec![
                waterfall_task(|cont: Continuation<i32, String>, _: Option<i32>| after(cont, 5, Ok(1))),
                waterfall_task(|cont: Continuation<i32, String>, prev: Option<i32>| {
                    after(cont, 5, Ok(prev.unwrap_or(0) + 10))
                }),
            ]);
            println!("waterfall:     {:?}", engine.waterfall(chain).await?);

            let failing: Container<Task<i32, String>> = Container::from(vec![
                task(|cont| after(cont, 20, Ok(1))),
                task(|cont| after(cont, 10, Err("second task failed".to_string()))),
            ]);
            match engine.parallel(failing).await {
                Ok(values) => println!("parallel:      {:?}", values),
                Err(e) => println!("parallel:      ❌ {}", e),
            }

            Ok::<(), anyhow::Error>(())
        })
        .await
}
