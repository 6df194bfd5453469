use std::sync::Arc;

use petromon::registry::Registry;

#[tokio::test]
async fn concurrent_adds_all_receive_the_broadcast() {
    let registry = Arc::new(Registry::new());

    let mut join_handles = Vec::new();
    for i in 0..16 {
        let registry = registry.clone();
        join_handles.push(tokio::spawn(async move {
            registry.add_client(&format!("client-{}", i))
        }));
    }

    let mut receivers = Vec::new();
    for handle in join_handles {
        receivers.push(handle.await.unwrap());
    }
    assert_eq!(registry.client_count(), 16);

    registry.broadcast(Arc::from("payload"));

    for rx in &mut receivers {
        let payload = rx.recv().await.expect("every client receives the tick");
        assert_eq!(&*payload, "payload");
        // Exactly one payload per tick.
        assert!(rx.try_recv().is_err());
    }
}

#[tokio::test]
async fn failed_subscriber_is_evicted_and_others_still_receive() {
    let registry = Registry::new();
    let mut rx_a = registry.add_client("a");
    let rx_b = registry.add_client("b");
    let mut rx_c = registry.add_client("c");

    // B's transport dies before the tick.
    drop(rx_b);

    registry.broadcast(Arc::from("tick-1"));

    assert_eq!(registry.client_ids(), vec!["a".to_string(), "c".to_string()]);
    let payload_a = rx_a.recv().await.unwrap();
    let payload_c = rx_c.recv().await.unwrap();
    // A and C got the exact same serialized bytes.
    assert!(Arc::ptr_eq(&payload_a, &payload_c));
    assert_eq!(&*payload_a, "tick-1");

    // Subsequent ticks no longer attempt delivery to B.
    registry.broadcast(Arc::from("tick-2"));
    assert_eq!(registry.client_count(), 2);
    assert_eq!(&*rx_a.recv().await.unwrap(), "tick-2");
    assert_eq!(&*rx_c.recv().await.unwrap(), "tick-2");
}

#[tokio::test]
async fn removal_concurrent_with_broadcasts_does_not_disrupt_others() {
    let registry = Arc::new(Registry::new());
    let mut keeper_rx = registry.add_client("keeper");
    for i in 0..8 {
        // Receivers dropped immediately; these clients are eviction fodder.
        drop(registry.add_client(&format!("doomed-{}", i)));
    }

    let broadcaster = {
        let registry = registry.clone();
        tokio::spawn(async move {
            for i in 0..100 {
                registry.broadcast(Arc::from(format!("tick-{}", i)));
                tokio::task::yield_now().await;
            }
        })
    };

    for i in 0..8 {
        registry.remove_client(&format!("doomed-{}", i));
    }

    broadcaster.await.expect("fanout never panics");
    assert_eq!(registry.client_ids(), vec!["keeper".to_string()]);

    // The surviving client got every tick, in order.
    for i in 0..100 {
        let payload = keeper_rx.recv().await.unwrap();
        assert_eq!(&*payload, format!("tick-{}", i));
    }
}

#[tokio::test]
async fn client_added_mid_stream_is_never_lost() {
    let registry = Arc::new(Registry::new());

    let broadcaster = {
        let registry = registry.clone();
        tokio::spawn(async move {
            for _ in 0..50 {
                registry.broadcast(Arc::from("early"));
                tokio::task::yield_now().await;
            }
        })
    };

    let mut rx = registry.add_client("latecomer");
    broadcaster.await.unwrap();

    // The latecomer may have missed early ticks but must see later ones.
    registry.broadcast(Arc::from("late"));
    let mut seen_late = false;
    while let Ok(payload) = rx.try_recv() {
        if &*payload == "late" {
            seen_late = true;
        }
    }
    assert!(seen_late);
}

#[tokio::test]
async fn remove_is_idempotent() {
    let registry = Registry::new();
    let _rx = registry.add_client("only");
    registry.remove_client("only");
    registry.remove_client("only");
    registry.remove_client("never-existed");
    assert_eq!(registry.client_count(), 0);
}
